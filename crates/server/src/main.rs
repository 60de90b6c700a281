//! Simple harness for the recommendation orchestrator.
//!
//! Loads the model and the OMDb client from `REEL_RECS_*` environment
//! variables, then prints the page for `REEL_RECS_SAMPLE_TITLE` and a
//! featured list.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use engine::SimilarityEngine;
use metadata_client::OmdbClient;
use server::{Config, RecommendationOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug,engine=debug")),
        )
        .init();

    info!("Starting ReelRecs server harness");

    let config = Config::from_env()?;

    info!("Loading model...");
    let model = Arc::new(config.load_model()?);
    info!("Model loaded with {} titles", model.len());

    let engine = Arc::new(SimilarityEngine::new(model).with_limit(config.recommendation_limit));
    let omdb = OmdbClient::new(config.omdb_api_key.clone()).with_base_url(config.omdb_base_url.clone());
    let orchestrator = RecommendationOrchestrator::new(engine, Arc::new(omdb));

    let page = orchestrator.movie_page(&config.sample_title).await?;
    if !page.found {
        info!("'{}' is not in the catalog", page.query);
    }
    info!(
        "{} ({}) - {} - IMDb {}",
        page.movie.title, page.movie.year, page.movie.runtime, page.movie.imdb_rating
    );
    for (i, movie) in page.suggestions.iter().enumerate() {
        info!(
            "{}. {} ({}) - {} - IMDb {}",
            i + 1,
            movie.title,
            movie.year,
            movie.runtime,
            movie.imdb_rating
        );
    }

    info!("Featured:");
    for movie in orchestrator.featured(4).await? {
        info!("  {} ({})", movie.title, movie.year);
    }

    Ok(())
}
