//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the configured dataset and prints enriched recommendations for the
//! title given as the first argument (or the first title in the dataset).

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use data_loader::SimilarityStore;
use server::{Config, RecommendationOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug,sources=debug")),
        )
        .init();

    info!("Starting ReelRecs server test harness");
    let config = Config::from_env()?;

    info!("Loading similarity dataset...");
    let store = Arc::new(
        SimilarityStore::load_from_files(&config.movie_data_dir)
            .context("Failed to load similarity dataset")?,
    );
    info!("Dataset loaded: {} movies", store.len());

    let orchestrator = RecommendationOrchestrator::from_config(store.clone(), &config)?;

    let title = match std::env::args().nth(1) {
        Some(title) => title,
        None => store
            .titles()
            .next()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Dataset is empty"))?,
    };
    let k = config.recommendation_count;

    info!("Getting recommendations for {:?} (k: {})", title, k);
    let result = orchestrator.recommend_enriched(&title, k).await?;

    for advisory in &result.advisories {
        warn!("{}", advisory);
    }

    info!("Received {} recommendations:", result.cards.len());
    for (i, card) in result.cards.iter().enumerate() {
        info!(
            "{}. {} ({}) - Rating: {:.1} - Similarity: {:.3}",
            i + 1,
            card.details.title,
            card.details.year,
            card.details.rating,
            card.score
        );
        info!("   Genres: {}", card.details.genres);
        info!("   Trailer: {}", card.details.trailer);
    }

    Ok(())
}
