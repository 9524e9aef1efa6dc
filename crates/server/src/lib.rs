//! Server crate for the ReelRecs similar-movie recommender.
//!
//! This crate contains the configuration and the orchestrator that ties the
//! similarity store, top-k selection and metadata enrichment together.

pub mod config;
pub mod orchestrator;

pub use config::Config;
pub use orchestrator::{
    Advisory, EnrichedRecommendations, MovieCard, RecommendationOrchestrator, Recommendations,
};
