//! Example: List the movies most similar to a title
//!
//! Run with: cargo run --package sources --example similar_movies -- "Avatar"
//!
//! This example shows how to:
//! 1. Load the similarity dataset
//! 2. Resolve a title to its row
//! 3. Generate similar-movie candidates
//! 4. Display the results

use anyhow::{anyhow, Result};
use data_loader::SimilarityStore;
use sources::SimilaritySource;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let title = std::env::args().nth(1).unwrap_or_else(|| "Avatar".to_string());

    println!("=== Similar Movies Example ===\n");

    let start = Instant::now();
    let store = Arc::new(SimilarityStore::load_from_files(Path::new("data/sample"))?);
    println!("Loaded {} movies in {:?}\n", store.len(), start.elapsed());

    let row = store
        .index_of_title(&title)
        .ok_or_else(|| anyhow!("{:?} is not in the dataset", title))?;

    let source = SimilaritySource::new(store.clone());
    let start = Instant::now();
    let candidates = source.get_candidates(row, 5)?;
    println!("Movies similar to {} ({:?}):", title, start.elapsed());

    for (rank, candidate) in candidates.iter().enumerate() {
        let neighbor = &store.records()[candidate.row];
        println!(
            "  {}. {} (id {}) - similarity {:.3}",
            rank + 1,
            neighbor.title,
            neighbor.id,
            candidate.score
        );
    }

    Ok(())
}
