//! Server crate for the ReelRecs recommendation front end.
//!
//! This crate contains the orchestrator that combines the similarity
//! engine with the metadata provider, and the environment configuration
//! used to wire them together.

pub mod config;
pub mod orchestrator;

pub use config::Config;
pub use orchestrator::{MoviePage, RecommendationOrchestrator};
