use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{RowIndex, SimilarityStore};
use server::{Config, EnrichedRecommendations, RecommendationOrchestrator, Recommendations};
use sources::SimilaritySource;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// ReelRecs - Similar Movie Recommender
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Recommends movies similar to a title using a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Dataset directory (overrides MOVIE_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact title, as listed by `titles`
        #[arg(long)]
        title: String,

        /// Number of recommendations (defaults to RECOMMENDATION_COUNT)
        #[arg(long)]
        limit: Option<usize>,

        /// Skip TMDB lookups and only print dataset titles and scores
        #[arg(long)]
        no_metadata: bool,
    },

    /// Search for titles (case-insensitive substring match)
    Search {
        #[arg(long)]
        title: String,
    },

    /// List selectable titles
    Titles {
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Time top-k selection for random titles
    Benchmark {
        /// Number of lookups to time
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Recommendations per lookup
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.movie_data_dir = data_dir;
    }

    let start = Instant::now();
    let store = Arc::new(
        SimilarityStore::load_from_files(&config.movie_data_dir)
            .context("Failed to load similarity dataset")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        store.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            no_metadata,
        } => {
            let limit = limit.unwrap_or(config.recommendation_count);
            handle_recommend(store, &config, &title, limit, no_metadata).await?
        }
        Commands::Search { title } => handle_search(&store, &title),
        Commands::Titles { limit } => handle_titles(&store, limit),
        Commands::Benchmark { requests, limit } => handle_benchmark(store, requests, limit)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    store: Arc<SimilarityStore>,
    config: &Config,
    title: &str,
    limit: usize,
    no_metadata: bool,
) -> Result<()> {
    let orchestrator = RecommendationOrchestrator::from_config(store, config)?;

    if no_metadata {
        let recommendations = orchestrator.recommend(title, limit)?;
        print_plain(&orchestrator, &recommendations);
    } else {
        let recommendations = orchestrator.recommend_enriched(title, limit).await?;
        print_cards(&recommendations);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &SimilarityStore, query: &str) {
    let matches = store.search_titles(query, 20);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  No matching titles.");
        return;
    }
    for row in matches {
        let record = &store.records()[row];
        println!("  {} {}", format!("[{}]", record.id).dimmed(), record.title);
    }
}

/// Handle the 'titles' command
fn handle_titles(store: &SimilarityStore, limit: usize) {
    println!("{}", "Available titles:".bold().blue());
    for title in store.titles().take(limit) {
        println!("  {} {}", "•".green(), title);
    }
    if store.len() > limit {
        println!("  ... and {} more", store.len() - limit);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(store: Arc<SimilarityStore>, requests: usize, limit: usize) -> Result<()> {
    if store.is_empty() {
        return Err(anyhow!("Dataset is empty, nothing to benchmark"));
    }
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }

    let source = SimilaritySource::new(store.clone());

    // Random query rows
    let rows: Vec<RowIndex> = (0..requests)
        .map(|_| rand::random::<u32>() as usize % store.len())
        .collect();

    // Sequential, one timing per lookup
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for &row in &rows {
        let start = Instant::now();
        source.get_candidates(row, limit)?;
        timings.push(start.elapsed());
    }

    // Parallel batch over the same rows
    let start = Instant::now();
    let batch = source.get_candidates_batch(&rows, limit);
    let batch_time = start.elapsed();
    if let Some(Err(e)) = batch.into_iter().find(|r| r.is_err()) {
        return Err(e.into());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Dataset size: {} movies", store.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!(
        "Throughput: {:.2} lookups/second",
        requests as f64 / total_time.as_secs_f64()
    );
    println!(
        "Parallel batch: {:?} ({:.2} lookups/second)",
        batch_time,
        requests as f64 / batch_time.as_secs_f64()
    );

    Ok(())
}

/// Print dataset titles and similarity scores only
fn print_plain(orchestrator: &RecommendationOrchestrator, recommendations: &Recommendations) {
    for advisory in &recommendations.advisories {
        println!("{} {}", "!".yellow(), advisory);
    }
    if recommendations.is_empty() {
        println!("No recommendations available.");
        return;
    }

    println!(
        "{}",
        format!("Movies similar to {}:", recommendations.query).bold().blue()
    );
    for (rank, candidate) in recommendations.candidates.iter().enumerate() {
        let title = orchestrator
            .store()
            .record(candidate.row)
            .map(|r| r.title.as_str())
            .unwrap_or("?");
        println!(
            "{}. {} - Similarity: {:.3}",
            (rank + 1).to_string().green(),
            title,
            candidate.score
        );
    }
}

/// Print one card per recommendation
fn print_cards(recommendations: &EnrichedRecommendations) {
    for advisory in &recommendations.advisories {
        println!("{} {}", "!".yellow(), advisory);
    }
    if recommendations.cards.is_empty() {
        println!("No recommendations available.");
        return;
    }

    println!(
        "{}",
        format!("Movies similar to {}:", recommendations.query).bold().blue()
    );
    for (rank, card) in recommendations.cards.iter().enumerate() {
        let details = &card.details;
        println!(
            "{}. {}",
            (rank + 1).to_string().green(),
            details.title.bold()
        );
        println!(
            "   ⭐ {:.1} | 📅 {} | Similarity: {:.3}",
            details.rating, details.year, card.score
        );
        println!("   {}", details.genres.dimmed());
        println!("   Poster:  {}", details.poster);
        println!("   Trailer: {}", details.trailer.cyan());
    }
}
