//! Movie metadata client for enriching recommendations.
//!
//! Recommendations are bare titles; this crate looks up the details shown
//! next to them (year, runtime, rating, poster). It provides:
//! - the `MetadataProvider` trait the rest of the workspace depends on
//! - `OmdbClient`, an implementation backed by the OMDb HTTP API
//! - `fetch_or_unavailable`, which turns any failure into "N/A" placeholders

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod omdb;

pub use omdb::OmdbClient;

/// Placeholder used for every field the provider could not supply
pub const UNAVAILABLE: &str = "N/A";

/// Errors that can occur when fetching movie metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned status {status}")]
    Status { status: u16 },

    #[error("No metadata for '{title}': {reason}")]
    NoMatch { title: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MetadataError>;

/// Details displayed for a single movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub title: String,
    pub year: String,
    pub runtime: String,
    pub imdb_rating: String,
    pub poster: String,
}

impl MovieMetadata {
    /// Metadata with every field set to "N/A"
    pub fn unavailable() -> Self {
        Self {
            title: UNAVAILABLE.to_string(),
            year: UNAVAILABLE.to_string(),
            runtime: UNAVAILABLE.to_string(),
            imdb_rating: UNAVAILABLE.to_string(),
            poster: UNAVAILABLE.to_string(),
        }
    }

    /// True when the poster field holds something other than the placeholder
    pub fn has_poster(&self) -> bool {
        self.poster != UNAVAILABLE && !self.poster.is_empty()
    }
}

/// Source of movie metadata.
///
/// `Send + Sync` so one provider can be shared across tokio tasks.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up metadata for a title
    async fn fetch(&self, title: &str) -> Result<MovieMetadata>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Fetch metadata, falling back to `MovieMetadata::unavailable()` on any
/// error
pub async fn fetch_or_unavailable(provider: &dyn MetadataProvider, title: &str) -> MovieMetadata {
    match provider.fetch(title).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(provider = provider.name(), title, error = %e, "Metadata unavailable");
            MovieMetadata::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl MetadataProvider for FailingProvider {
        async fn fetch(&self, title: &str) -> Result<MovieMetadata> {
            Err(MetadataError::NoMatch {
                title: title.to_string(),
                reason: "Movie not found!".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_unavailable_metadata() {
        let metadata = MovieMetadata::unavailable();
        assert_eq!(metadata.title, "N/A");
        assert_eq!(metadata.imdb_rating, "N/A");
        assert!(!metadata.has_poster());
    }

    #[tokio::test]
    async fn test_fetch_or_unavailable_degrades_errors() {
        let metadata = fetch_or_unavailable(&FailingProvider, "Avatar").await;
        assert_eq!(metadata, MovieMetadata::unavailable());
    }
}
