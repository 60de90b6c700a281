use anyhow::Context;
use data_loader::ModelIndex;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let model_dir = Path::new("data/model");

    println!("Loading recommendation model...\n");

    let start = Instant::now();
    let index = ModelIndex::load_from_dir(model_dir).context("Failed to load model")?;
    let elapsed = start.elapsed();

    let titles = index.len();
    let scores = titles * titles;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Titles: {}", titles);
    println!("Similarity scores: {}", scores);
    println!("\nPerformance: {:.0} scores/second",
             scores as f64 / elapsed.as_secs_f64());
    Ok(())
}
