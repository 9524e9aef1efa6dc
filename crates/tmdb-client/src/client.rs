//! HTTP client for The Movie Database (TMDB) v3 API.
//!
//! One request per movie: `/movie/{id}` with `append_to_response=videos`
//! returns details and trailers together.

use crate::types::{EnrichmentRecord, MovieDetails, DEFAULT_IMAGE_BASE};
use crate::MetadataError;
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TMDB API root
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Anything that can produce display metadata for a catalog id.
///
/// Implemented by [`TmdbClient`]; tests substitute their own sources.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch and map the metadata of one movie
    async fn fetch_details(&self, movie_id: MovieId) -> Result<EnrichmentRecord, MetadataError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// v3 API key; requests without one are rejected by TMDB
    pub api_key: Option<String>,
    pub api_url: String,
    pub image_url: String,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            image_url: DEFAULT_IMAGE_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_none() {
            warn!("No TMDB API key configured; metadata lookups will fall back to placeholders");
        }

        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait::async_trait]
impl MetadataSource for TmdbClient {
    async fn fetch_details(&self, movie_id: MovieId) -> Result<EnrichmentRecord, MetadataError> {
        let url = format!(
            "{}/movie/{}",
            self.config.api_url.trim_end_matches('/'),
            movie_id
        );
        debug!(movie_id, "Requesting TMDB details");

        let mut request = self.http_client.get(&url).query(&[
            ("language", "en-US"),
            ("append_to_response", "videos"),
        ]);
        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[("api_key", api_key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetadataError::from_request(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::HttpStatus {
                status: status.as_u16(),
                movie_id,
            });
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| MetadataError::InvalidResponse(e.to_string()))?;

        Ok(EnrichmentRecord::from_details(details, &self.config.image_url))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
