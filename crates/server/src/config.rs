use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tmdb_client::{TmdbConfig, DEFAULT_API_URL, DEFAULT_IMAGE_BASE};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key. Without it every card falls back to placeholders.
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL poster paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Per-lookup metadata timeout in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Number of recommendations per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Directory holding movies.dat and similarity.dat
    #[serde(default = "default_movie_data_dir")]
    pub movie_data_dir: PathBuf,
}

fn default_tmdb_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_tmdb_image_url() -> String {
    DEFAULT_IMAGE_BASE.to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    12
}

fn default_recommendation_count() -> usize {
    5
}

fn default_movie_data_dir() -> PathBuf {
    PathBuf::from("data/sample")
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    /// Settings for the TMDB client
    pub fn tmdb_config(&self) -> TmdbConfig {
        TmdbConfig {
            api_key: self.tmdb_api_key.clone().filter(|key| !key.is_empty()),
            api_url: self.tmdb_api_url.clone(),
            image_url: self.tmdb_image_url.clone(),
            timeout: self.metadata_timeout(),
        }
    }
}
