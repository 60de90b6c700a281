//! Example: recommend titles similar to a movie
//!
//! Run with: cargo run --package engine --example recommend_titles -- "Avatar"
//!
//! This example shows how to:
//! 1. Load the model artifacts
//! 2. Build a SimilarityEngine
//! 3. Query it and display the ranked results

use data_loader::ModelIndex;
use engine::SimilarityEngine;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,engine=debug")
        .init();

    let title = std::env::args().nth(1).unwrap_or_else(|| "Avatar".to_string());

    println!("=== ReelRecs Similarity Example ===\n");

    println!("Loading model...");
    let start = Instant::now();
    let model = Arc::new(ModelIndex::load_from_dir(Path::new("data/model"))?);
    println!("Loaded {} titles in {:?}\n", model.len(), start.elapsed());

    let engine = SimilarityEngine::new(model);

    let start = Instant::now();
    match engine.recommend_scored(&title) {
        Ok(recs) => {
            println!("Because you watched '{}' ({:?}):", title, start.elapsed());
            for (i, rec) in recs.iter().enumerate() {
                println!("  {}. {} (similarity {:.3})", i + 1, rec.title, rec.score);
            }
        }
        Err(e) => println!("{}", e),
    }

    Ok(())
}
