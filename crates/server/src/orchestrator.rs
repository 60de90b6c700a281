//! # Recommendation Orchestrator
//!
//! Coordinates a recommendation request end to end:
//! 1. Ask the similarity engine for titles like the query
//! 2. Fetch metadata for the query and every suggestion concurrently
//! 3. Assemble the page the front end renders
//!
//! It also builds the "featured" list: a random sample of catalog titles
//! with their metadata.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::seq::index;
use serde::Serialize;
use tracing::{debug, info};

use engine::{RecommendError, SimilarityEngine};
use metadata_client::{MetadataProvider, MovieMetadata, fetch_or_unavailable};

/// Everything needed to render the details page of a movie
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    /// Title exactly as requested
    pub query: String,
    /// Whether the query matched a catalog entry
    pub found: bool,
    pub movie: MovieMetadata,
    /// Similar movies, most similar first
    pub suggestions: Vec<MovieMetadata>,
}

/// Ties the similarity engine to the metadata provider
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    engine: Arc<SimilarityEngine>,
    metadata: Arc<dyn MetadataProvider>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `engine` - Shared similarity engine
    /// * `metadata` - Provider used to enrich titles (e.g. `OmdbClient`)
    pub fn new(engine: Arc<SimilarityEngine>, metadata: Arc<dyn MetadataProvider>) -> Self {
        Self { engine, metadata }
    }

    pub fn engine(&self) -> &Arc<SimilarityEngine> {
        &self.engine
    }

    /// Build the details page for `title`.
    ///
    /// An unknown title is not an error: the page comes back with
    /// `found == false` and no suggestions. Metadata failures degrade to
    /// "N/A" placeholders.
    pub async fn movie_page(&self, title: &str) -> Result<MoviePage> {
        let start_time = Instant::now();

        let (found, suggestions) = match self.engine.recommend(title) {
            Ok(titles) => (true, titles),
            Err(RecommendError::NotFound { .. }) => {
                info!("'{}' is not in the catalog", title);
                (false, Vec::new())
            }
        };
        debug!("Engine returned {} suggestions for '{}'", suggestions.len(), title);

        let mut titles = Vec::with_capacity(suggestions.len() + 1);
        titles.push(title.to_string());
        titles.extend(suggestions);

        let mut enriched = self.enrich(titles).await?.into_iter();
        let movie = enriched.next().unwrap_or_else(MovieMetadata::unavailable);
        let suggestions: Vec<MovieMetadata> = enriched.collect();

        info!(
            "Built page for '{}' with {} suggestions in {:.2?}",
            title,
            suggestions.len(),
            start_time.elapsed()
        );

        Ok(MoviePage {
            query: title.to_string(),
            found,
            movie,
            suggestions,
        })
    }

    /// Metadata for `count` random catalog titles.
    ///
    /// `count` is clamped to the catalog size; titles never repeat.
    pub async fn featured(&self, count: usize) -> Result<Vec<MovieMetadata>> {
        let start_time = Instant::now();

        let titles = self.sample_titles(count);
        let featured = self.enrich(titles).await?;

        info!(
            "Built {} featured movies in {:.2?}",
            featured.len(),
            start_time.elapsed()
        );
        Ok(featured)
    }

    /// Pick up to `count` distinct catalog titles at random
    fn sample_titles(&self, count: usize) -> Vec<String> {
        let catalog = self.engine.model().catalog();
        let amount = count.min(catalog.len());

        index::sample(&mut rand::rng(), catalog.len(), amount)
            .into_iter()
            .filter_map(|id| catalog.get(id).map(|t| t.title.clone()))
            .collect()
    }

    /// Fetch metadata for every title concurrently, preserving order
    async fn enrich(&self, titles: Vec<String>) -> Result<Vec<MovieMetadata>> {
        let handles: Vec<_> = titles
            .into_iter()
            .map(|title| {
                let metadata = Arc::clone(&self.metadata);
                tokio::spawn(async move { fetch_or_unavailable(metadata.as_ref(), &title).await })
            })
            .collect();

        let mut enriched = Vec::with_capacity(handles.len());
        for handle in handles {
            enriched.push(handle.await.context("Metadata task panicked")?);
        }
        Ok(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader::ModelIndex;
    use metadata_client::MetadataError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_engine() -> Arc<SimilarityEngine> {
        let titles = vec!["Avatar", "Inception", "Titanic", "Up", "Cars", "Heat", "Alien"];
        let rows = vec![
            vec![1.0, 0.2, 0.9, 0.1, 0.05, 0.3, 0.6],
            vec![0.2, 1.0, 0.4, 0.6, 0.3, 0.5, 0.1],
            vec![0.9, 0.4, 1.0, 0.2, 0.1, 0.2, 0.3],
            vec![0.1, 0.6, 0.2, 1.0, 0.7, 0.1, 0.2],
            vec![0.05, 0.3, 0.1, 0.7, 1.0, 0.0, 0.1],
            vec![0.3, 0.5, 0.2, 0.1, 0.0, 1.0, 0.4],
            vec![0.6, 0.1, 0.3, 0.2, 0.1, 0.4, 1.0],
        ];
        let model = ModelIndex::from_parts(titles, rows).expect("valid test model");
        Arc::new(SimilarityEngine::new(Arc::new(model)))
    }

    /// Mock provider that echoes the title and records every request.
    /// Titles listed in `missing` fail with `NoMatch`.
    #[derive(Default)]
    struct MockMetadata {
        requests: Mutex<Vec<String>>,
        missing: Vec<&'static str>,
    }

    #[async_trait]
    impl MetadataProvider for MockMetadata {
        async fn fetch(&self, title: &str) -> metadata_client::Result<MovieMetadata> {
            self.requests.lock().unwrap().push(title.to_string());
            if self.missing.iter().any(|m| *m == title) {
                return Err(MetadataError::NoMatch {
                    title: title.to_string(),
                    reason: "Movie not found!".to_string(),
                });
            }
            Ok(MovieMetadata {
                title: title.to_string(),
                year: "2000".to_string(),
                runtime: "100 min".to_string(),
                imdb_rating: "7.0".to_string(),
                poster: format!("https://posters.example/{}.jpg", title),
            })
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn build_test_orchestrator(mock: Arc<MockMetadata>) -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(build_test_engine(), mock)
    }

    // ============================================================================
    // movie_page
    // ============================================================================

    #[tokio::test]
    async fn test_movie_page_enriches_all_five_suggestions() {
        let mock = Arc::new(MockMetadata::default());
        let orchestrator = build_test_orchestrator(mock.clone());

        let page = orchestrator.movie_page("Avatar").await.unwrap();

        assert!(page.found);
        assert_eq!(page.query, "Avatar");
        assert_eq!(page.movie.title, "Avatar");

        let titles: Vec<&str> = page.suggestions.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Titanic", "Alien", "Heat", "Inception", "Up"]);

        // One lookup for the movie itself plus one per suggestion
        assert_eq!(mock.requests.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_movie_page_for_unknown_title() {
        let mock = Arc::new(MockMetadata {
            missing: vec!["Nonexistent Movie"],
            ..Default::default()
        });
        let orchestrator = build_test_orchestrator(mock.clone());

        let page = orchestrator.movie_page("Nonexistent Movie").await.unwrap();

        assert!(!page.found);
        assert!(page.suggestions.is_empty());
        assert_eq!(page.movie, MovieMetadata::unavailable());
    }

    #[tokio::test]
    async fn test_movie_page_degrades_missing_metadata() {
        let mock = Arc::new(MockMetadata {
            missing: vec!["Alien"],
            ..Default::default()
        });
        let orchestrator = build_test_orchestrator(mock);

        let page = orchestrator.movie_page("Avatar").await.unwrap();

        assert_eq!(page.suggestions.len(), 5);
        assert_eq!(page.suggestions[0].title, "Titanic");
        assert_eq!(page.suggestions[1], MovieMetadata::unavailable());
        assert_eq!(page.suggestions[2].title, "Heat");
    }

    // ============================================================================
    // featured
    // ============================================================================

    #[tokio::test]
    async fn test_featured_returns_distinct_catalog_titles() {
        let mock = Arc::new(MockMetadata::default());
        let orchestrator = build_test_orchestrator(mock);

        let featured = orchestrator.featured(4).await.unwrap();
        assert_eq!(featured.len(), 4);

        let catalog = orchestrator.engine().model().catalog();
        let unique: HashSet<&str> = featured.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(unique.len(), 4);
        assert!(unique.iter().all(|t| catalog.find(t).is_some()));
    }

    #[tokio::test]
    async fn test_featured_clamps_to_catalog_size() {
        let mock = Arc::new(MockMetadata::default());
        let orchestrator = build_test_orchestrator(mock);

        assert_eq!(orchestrator.featured(50).await.unwrap().len(), 7);
        assert!(orchestrator.featured(0).await.unwrap().is_empty());
    }
}
