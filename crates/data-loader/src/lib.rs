//! # Data Loader Crate
//!
//! This crate loads the precomputed recommendation model: the movie
//! catalog and its pairwise similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Title, Catalog, SimilarityMatrix, ModelIndex)
//! - **parser**: Parse the .dat artifact files
//! - **index**: Build and validate the ModelIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ModelIndex;
//! use std::path::Path;
//!
//! let index = ModelIndex::load_from_dir(Path::new("data/model"))?;
//!
//! let avatar = index.catalog().find("Avatar").unwrap();
//! let row = index.similarity().row(avatar.id).unwrap();
//! println!("{} has {} scores", avatar.title, row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Catalog, ModelBundle, ModelIndex, Score, SimilarityMatrix, Title, TitleId};
