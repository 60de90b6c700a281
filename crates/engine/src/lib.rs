//! # Engine Crate
//!
//! Item-to-item movie recommendations over a precomputed similarity matrix.
//!
//! Given a title, the engine looks up its row in the matrix and returns the
//! five most similar other titles. The model is loaded once by
//! `data_loader` and shared read-only, so one engine can serve any number
//! of concurrent callers.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ModelIndex;
//! use engine::SimilarityEngine;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let model = Arc::new(ModelIndex::load_from_dir(Path::new("data/model"))?);
//! let engine = SimilarityEngine::new(model);
//!
//! for title in engine.recommend("Avatar")? {
//!     println!("{}", title);
//! }
//! ```

pub mod error;
pub mod similarity;

pub use error::{RecommendError, Result};
pub use similarity::{ScoredTitle, SimilarityEngine, DEFAULT_LIMIT};
