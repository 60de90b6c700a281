//! Integration tests loading model artifacts from disk.

use data_loader::{DataLoadError, ModelIndex};
use std::fs;
use tempfile::TempDir;

fn write_model_dir(catalog: &str, similarity: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie_list.dat"), catalog).unwrap();
    fs::write(dir.path().join("similarity.dat"), similarity).unwrap();
    dir
}

#[test]
fn test_load_from_dir() {
    let dir = write_model_dir(
        "0::Avatar\n1::Inception\n2::Titanic\n",
        "1.0,0.2,0.9\n0.2,1.0,0.3\n0.9,0.3,1.0\n",
    );

    let index = ModelIndex::load_from_dir(dir.path()).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.catalog().find("Titanic").map(|t| t.id), Some(2));
    assert_eq!(index.similarity().get(0, 2), Some(0.9));
}

#[test]
fn test_stale_matrix_is_rejected() {
    // Catalog grew but the matrix was not regenerated
    let dir = write_model_dir(
        "0::Avatar\n1::Inception\n2::Titanic\n",
        "1.0,0.2\n0.2,1.0\n",
    );

    let err = ModelIndex::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::DimensionMismatch { titles: 3, rows: 2, .. }
    ));
}

#[test]
fn test_missing_similarity_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie_list.dat"), "0::Avatar\n").unwrap();

    let err = ModelIndex::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, DataLoadError::FileNotFound { .. }));
}

#[test]
fn test_load_from_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{"titles": ["Up", "Cars"], "similarity": [[1.0, 0.4], [0.4, 1.0]]}"#,
    )
    .unwrap();

    let index = ModelIndex::load_from_json(&path).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.similarity().get(1, 0), Some(0.4));
}

#[test]
fn test_load_from_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, r#"{"titles": ["Up"]}"#).unwrap();

    let err = ModelIndex::load_from_json(&path).unwrap_err();
    assert!(matches!(err, DataLoadError::Json(_)));
}
