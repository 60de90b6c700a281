//! Error types for recommendation queries.

use thiserror::Error;

/// Errors returned by `SimilarityEngine` queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The title has no exact match in the catalog
    #[error("Movie not found in the database: {title}")]
    NotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
