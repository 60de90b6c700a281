//! ModelIndex building and validation.
//!
//! This module turns parsed artifacts into a `ModelIndex`:
//! - parse the catalog and the similarity matrix (in parallel)
//! - check that the matrix is N×N for a catalog of N titles
//! - check that every score is finite
//! - flatten the rows into one contiguous buffer

use crate::error::{DataLoadError, Result};
use crate::parser::{self, CATALOG_FILE, SIMILARITY_FILE};
use crate::types::*;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

impl ModelIndex {
    /// Load the model from a directory holding movie_list.dat and
    /// similarity.dat
    pub fn load_from_dir(model_dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {:?}", model_dir);

        let catalog_path = model_dir.join(CATALOG_FILE);
        let similarity_path = model_dir.join(SIMILARITY_FILE);

        // The matrix dominates load time, so parse both files side by side
        let (titles, rows) = rayon::join(
            || parser::parse_catalog(&catalog_path),
            || parser::parse_similarity(&similarity_path),
        );
        let titles = titles?;
        let rows = rows?;

        info!("Parsed {} titles and {} similarity rows", titles.len(), rows.len());

        Self::from_parts(titles, rows)
    }

    /// Load the model from a single JSON bundle
    pub fn load_from_json(path: &Path) -> Result<Self> {
        info!("Loading model bundle from {:?}", path);

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => DataLoadError::IoError(e),
        })?;
        let bundle: ModelBundle = serde_json::from_reader(BufReader::new(file))?;

        Self::from_bundle(bundle)
    }

    pub fn from_bundle(bundle: ModelBundle) -> Result<Self> {
        Self::from_parts(bundle.titles, bundle.similarity)
    }

    /// Build the model from titles in index order and matrix rows.
    ///
    /// Fails with `DimensionMismatch` unless there is exactly one row per
    /// title and every row has one score per title.
    pub fn from_parts<S: Into<String>>(titles: Vec<S>, rows: Vec<Vec<Score>>) -> Result<Self> {
        let catalog = Catalog::from_titles(titles);
        validate_dimensions(catalog.len(), &rows)?;
        validate_scores(&rows)?;

        let size = catalog.len();
        // Adding 0.0 turns -0.0 into 0.0 so equal scores compare equal when ranked
        let scores: Vec<Score> = rows.into_iter().flatten().map(|s| s + 0.0).collect();
        let index = ModelIndex {
            catalog,
            similarity: SimilarityMatrix { size, scores },
        };

        info!("ModelIndex built and validated with {} titles", size);
        Ok(index)
    }
}

/// Check the catalog/matrix dimension invariant
fn validate_dimensions(titles: usize, rows: &[Vec<Score>]) -> Result<()> {
    if rows.len() != titles {
        return Err(DataLoadError::DimensionMismatch {
            titles,
            rows: rows.len(),
            row: None,
            row_len: None,
        });
    }

    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != titles) {
        return Err(DataLoadError::DimensionMismatch {
            titles,
            rows: rows.len(),
            row: Some(row),
            row_len: Some(values.len()),
        });
    }

    Ok(())
}

/// Reject NaN and infinities so that score ordering is total
fn validate_scores(rows: &[Vec<Score>]) -> Result<()> {
    let bad = rows.par_iter().enumerate().find_map_first(|(i, row)| {
        row.iter()
            .position(|s| !s.is_finite())
            .map(|j| (i, j, row[j]))
    });

    match bad {
        Some((i, j, value)) => Err(DataLoadError::InvalidValue {
            field: format!("similarity[{}][{}]", i, j),
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}
