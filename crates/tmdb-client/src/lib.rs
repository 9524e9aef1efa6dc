//! Movie metadata enrichment backed by The Movie Database (TMDB).
//!
//! This crate turns catalog ids into display cards. It handles:
//! - Calling the TMDB details endpoint (with trailers appended)
//! - Mapping the response onto an [`EnrichmentRecord`]
//! - Falling back to placeholder values on any failure
//! - Caching successful lookups for the lifetime of the process
//! - Fanning lookups out in parallel with a per-call timeout

use data_loader::MovieId;
use std::time::Duration;
use thiserror::Error;

pub mod cache;
pub mod client;
pub mod fetcher;
pub mod types;

pub use cache::MetadataCache;
pub use client::{MetadataSource, TmdbClient, TmdbConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use fetcher::{Enrichment, MetadataFetcher};
pub use types::{EnrichmentRecord, MovieDetails, DEFAULT_IMAGE_BASE, PLACEHOLDER_POSTER};

/// Errors that can occur when looking up metadata.
///
/// These never reach the recommendation flow: [`MetadataFetcher`] converts
/// them into fallback records plus an advisory message.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("TMDB returned HTTP {status} for movie {movie_id}")]
    HttpStatus { status: u16, movie_id: MovieId },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response from TMDB: {0}")]
    InvalidResponse(String),
}

impl MetadataError {
    /// Classify a failed request, separating timeouts from other network errors
    pub(crate) fn from_request(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            MetadataError::Timeout(timeout)
        } else {
            MetadataError::Network(error)
        }
    }
}
