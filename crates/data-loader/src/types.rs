//! Core domain types for the precomputed recommendation model.
//!
//! The model is two immutable pieces joined by position:
//! - a `Catalog` of titles, where a title's id is its index
//! - a dense, square `SimilarityMatrix` whose row `i` scores title `i`
//!   against every other title

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a title in the catalog, also its row/column in the matrix
pub type TitleId = usize;

/// Similarity score between two catalog entries
pub type Score = f32;

// =============================================================================
// Catalog
// =============================================================================

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub title: String,
}

/// Ordered list of known titles.
///
/// Lookup by display string is exact and case-sensitive. When the same
/// display string occurs more than once, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) titles: Vec<Title>,
    /// Display string -> id of its first occurrence
    pub(crate) by_title: HashMap<String, TitleId>,
}

impl Catalog {
    /// Build a catalog from display strings in index order
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Catalog::default();
        for title in titles {
            catalog.push(title.into());
        }
        catalog
    }

    pub(crate) fn push(&mut self, title: String) {
        let id = self.titles.len();
        self.by_title.entry(title.clone()).or_insert(id);
        self.titles.push(Title { id, title });
    }

    /// Number of titles
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Get a title by id
    pub fn get(&self, id: TitleId) -> Option<&Title> {
        self.titles.get(id)
    }

    /// Exact, case-sensitive lookup returning the first matching entry
    pub fn find(&self, title: &str) -> Option<&Title> {
        self.by_title.get(title).map(|&id| &self.titles[id])
    }

    /// All titles in catalog order
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Case-insensitive substring search.
    ///
    /// Exact (case-insensitive) matches come first, then the remaining
    /// substring matches; both groups keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&Title> {
        let query = query.to_lowercase();
        let mut exact = Vec::new();
        let mut partial = Vec::new();

        for entry in &self.titles {
            let lower = entry.title.to_lowercase();
            if lower == query {
                exact.push(entry);
            } else if lower.contains(&query) {
                partial.push(entry);
            }
        }

        exact.extend(partial);
        exact
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense N×N similarity table, stored row-major in one buffer.
///
/// Symmetry is not enforced. Constructed only through `ModelIndex`, which
/// guarantees the dimensions match the catalog and every score is finite.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    pub(crate) size: usize,
    pub(crate) scores: Vec<Score>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of `id` against every catalog entry, indexed by `TitleId`
    pub fn row(&self, id: TitleId) -> Option<&[Score]> {
        if id >= self.size {
            return None;
        }
        let start = id * self.size;
        Some(&self.scores[start..start + self.size])
    }

    /// Similarity between two entries
    pub fn get(&self, a: TitleId, b: TitleId) -> Option<Score> {
        self.row(a).and_then(|row| row.get(b).copied())
    }
}

// =============================================================================
// ModelIndex - catalog and matrix loaded together
// =============================================================================

/// The loaded model: a catalog and its similarity matrix.
///
/// Immutable once built. Share it with `Arc<ModelIndex>`.
#[derive(Debug, Clone)]
pub struct ModelIndex {
    pub(crate) catalog: Catalog,
    pub(crate) similarity: SimilarityMatrix,
}

impl ModelIndex {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of titles in the model
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// JSON bundle holding both artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub titles: Vec<String>,
    pub similarity: Vec<Vec<Score>>,
}
