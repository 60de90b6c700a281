//! Parsers for the model artifact files.
//!
//! - movie_list.dat: index::title
//! - similarity.dat: one comma-separated row of scores per line
//!
//! Each parser has a `_str` variant that works on file contents so it can
//! be tested without touching the filesystem.

use crate::error::{DataLoadError, Result};
use crate::types::Score;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CATALOG_FILE: &str = "movie_list.dat";
pub const SIMILARITY_FILE: &str = "similarity.dat";

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Non-empty lines paired with their 1-based line number
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse the movie_list.dat file
pub fn parse_catalog(path: &Path) -> Result<Vec<String>> {
    let content = read_file(path)?;
    parse_catalog_str(&content)
}

/// Parse catalog contents.
///
/// Format: index::title
///
/// Indices must run 0, 1, 2, ... in file order since they are the join key
/// into the similarity matrix.
pub fn parse_catalog_str(content: &str) -> Result<Vec<String>> {
    let mut titles = Vec::new();

    for (line_no, line) in numbered_lines(content) {
        let (index, title) = line.split_once("::").ok_or_else(|| DataLoadError::ParseError {
            file: CATALOG_FILE.to_string(),
            line: line_no,
            reason: "Missing '::' separator".to_string(),
        })?;

        let index: usize = index.trim().parse().map_err(|e| DataLoadError::ParseError {
            file: CATALOG_FILE.to_string(),
            line: line_no,
            reason: format!("Invalid index: {}", e),
        })?;

        if index != titles.len() {
            return Err(DataLoadError::ParseError {
                file: CATALOG_FILE.to_string(),
                line: line_no,
                reason: format!("Expected index {} but found {}", titles.len(), index),
            });
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: CATALOG_FILE.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        titles.push(title.to_string());
    }

    Ok(titles)
}

/// Parse the similarity.dat file
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<Score>>> {
    let content = read_file(path)?;
    parse_similarity_str(&content)
}

/// Parse similarity contents, one row per line, rows parsed in parallel.
///
/// Only the shape of each row is checked here; whether the rows fit the
/// catalog is decided by `ModelIndex`.
pub fn parse_similarity_str(content: &str) -> Result<Vec<Vec<Score>>> {
    let lines: Vec<(usize, &str)> = numbered_lines(content).collect();

    lines
        .par_iter()
        .map(|&(line_no, line)| parse_row(line_no, line))
        .collect()
}

fn parse_row(line_no: usize, line: &str) -> Result<Vec<Score>> {
    line.split(',')
        .map(|value| {
            value.trim().parse::<Score>().map_err(|e| DataLoadError::ParseError {
                file: SIMILARITY_FILE.to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", value.trim(), e),
            })
        })
        .collect()
}
