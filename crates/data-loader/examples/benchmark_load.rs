use anyhow::{Context, Result};
use data_loader::SimilarityStore;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<()> {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample"));

    println!("Loading similarity dataset from {}...\n", data_dir.display());

    let start = Instant::now();
    let store = SimilarityStore::load_from_files(&data_dir)
        .context("Failed to load dataset")?;
    let elapsed = start.elapsed();

    let dimension = store.matrix().dimension();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", store.len());
    println!("Matrix: {}x{}", dimension, dimension);
    println!("\nPerformance: {:.0} scores/second",
             (dimension * dimension) as f64 / elapsed.as_secs_f64());
    Ok(())
}
