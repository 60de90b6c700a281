//! Similarity Engine - item-to-item recommendations
//!
//! Answers "what is most like this movie?" from the precomputed matrix.
//!
//! ## Algorithm
//! 1. Find the first catalog entry whose title matches exactly
//! 2. Take its similarity row
//! 3. Pair every other title with its score (the query itself is skipped by
//!    index, so it can never recommend itself)
//! 4. Stable sort by score DESC, so equal scores stay in catalog order
//! 5. Keep the top `limit` (5 by default)

use crate::error::{RecommendError, Result};
use data_loader::{ModelIndex, Score, TitleId};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of recommendations returned per query
pub const DEFAULT_LIMIT: usize = 5;

/// A recommended title with the score that ranked it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTitle {
    pub id: TitleId,
    pub title: String,
    pub score: Score,
}

/// Top-k similarity queries over a loaded model
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    /// Shared, read-only model (no locking needed)
    model: Arc<ModelIndex>,

    /// How many titles a query returns
    limit: usize,
}

impl SimilarityEngine {
    /// Create a new engine returning `DEFAULT_LIMIT` titles per query
    pub fn new(model: Arc<ModelIndex>) -> Self {
        Self {
            model,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Configure how many titles a query returns (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn model(&self) -> &Arc<ModelIndex> {
        &self.model
    }

    /// Titles most similar to `title`, most similar first.
    ///
    /// `title` must match a catalog entry exactly (case-sensitive).
    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title)?
            .into_iter()
            .map(|scored| scored.title)
            .collect())
    }

    /// Same as `recommend`, but an unknown title yields an empty list
    pub fn recommend_or_empty(&self, title: &str) -> Vec<String> {
        self.recommend(title).unwrap_or_default()
    }

    /// Ranked recommendations including their similarity scores
    #[instrument(skip(self), fields(limit = self.limit))]
    pub fn recommend_scored(&self, title: &str) -> Result<Vec<ScoredTitle>> {
        let catalog = self.model.catalog();

        let Some(query) = catalog.find(title) else {
            debug!("No catalog entry matches '{}'", title);
            return Err(RecommendError::NotFound {
                title: title.to_string(),
            });
        };

        let ranked = self.rank(query.id);
        let recommendations: Vec<ScoredTitle> = ranked
            .into_iter()
            .take(self.limit)
            .filter_map(|(id, score)| {
                let entry = catalog.get(id)?;
                Some(ScoredTitle {
                    id,
                    title: entry.title.clone(),
                    score,
                })
            })
            .collect();

        debug!(
            "Recommended {} titles for '{}' (id {})",
            recommendations.len(),
            title,
            query.id
        );
        Ok(recommendations)
    }

    /// Every other title paired with its score against `id`, best first.
    ///
    /// Equal scores keep ascending id order.
    fn rank(&self, id: TitleId) -> Vec<(TitleId, Score)> {
        let Some(row) = self.model.similarity().row(id) else {
            return Vec::new();
        };

        let mut scored: Vec<(TitleId, Score)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != id)
            .collect();

        // par_sort_by is stable; scores are finite with no -0.0, normalized at load
        scored.par_sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_model() -> Arc<ModelIndex> {
        let titles = vec!["Avatar", "Inception", "Titanic", "Up", "Cars"];
        let rows = vec![
            vec![1.0, 0.2, 0.9, 0.1, 0.05],
            vec![0.2, 1.0, 0.3, 0.3, 0.3],
            vec![0.9, 0.3, 1.0, 0.0, 0.1],
            vec![0.1, 0.3, 0.0, 1.0, 0.8],
            vec![0.05, 0.3, 0.1, 0.8, 1.0],
        ];
        Arc::new(ModelIndex::from_parts(titles, rows).unwrap())
    }

    #[test]
    fn test_rank_excludes_query_and_sorts_desc() {
        let engine = SimilarityEngine::new(create_test_model());

        let ranked = engine.rank(0);
        let ids: Vec<TitleId> = ranked.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_rank_breaks_ties_by_catalog_order() {
        let engine = SimilarityEngine::new(create_test_model());

        // Inception scores 0.3 against Titanic, Up and Cars
        let ranked = engine.rank(1);
        let ids: Vec<TitleId> = ranked.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 3, 4, 0]);
    }

    #[test]
    fn test_rank_out_of_range() {
        let engine = SimilarityEngine::new(create_test_model());
        assert!(engine.rank(99).is_empty());
    }

    #[test]
    fn test_recommend_scored() {
        let engine = SimilarityEngine::new(create_test_model());

        let recs = engine.recommend_scored("Up").unwrap();
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].title, "Cars");
        assert_eq!(recs[0].id, 4);
        assert_eq!(recs[0].score, 0.8);
    }

    #[test]
    fn test_with_limit() {
        let engine = SimilarityEngine::new(create_test_model()).with_limit(2);
        assert_eq!(engine.limit(), 2);
        assert_eq!(engine.recommend("Avatar").unwrap(), vec!["Titanic", "Inception"]);

        let engine = engine.with_limit(0);
        assert!(engine.recommend("Avatar").unwrap().is_empty());
    }

    #[test]
    fn test_recommend_or_empty() {
        let engine = SimilarityEngine::new(create_test_model());
        assert!(engine.recommend_or_empty("Nonexistent Movie").is_empty());
        assert_eq!(engine.recommend_or_empty("Titanic")[0], "Avatar");
    }
}
