//! Cached, time-bounded metadata lookups that never fail.

use crate::cache::MetadataCache;
use crate::client::{MetadataSource, DEFAULT_TIMEOUT};
use crate::types::EnrichmentRecord;
use crate::MetadataError;
use data_loader::MovieId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Outcome of one lookup: always a record, plus a message when the record
/// is a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub movie_id: MovieId,
    pub record: EnrichmentRecord,
    /// Why the record holds placeholder values, if it does
    pub advisory: Option<String>,
}

impl Enrichment {
    fn found(movie_id: MovieId, record: EnrichmentRecord) -> Self {
        Self {
            movie_id,
            record,
            advisory: None,
        }
    }

    fn fallback(movie_id: MovieId, reason: String) -> Self {
        Self {
            movie_id,
            record: EnrichmentRecord::fallback(),
            advisory: Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Wraps a [`MetadataSource`] with a cache, a timeout and fallback values.
///
/// Cheap to clone; clones share the source and the cache.
#[derive(Clone)]
pub struct MetadataFetcher {
    source: Arc<dyn MetadataSource>,
    cache: Arc<MetadataCache>,
    timeout: Duration,
}

impl MetadataFetcher {
    pub fn new(source: Arc<dyn MetadataSource>, cache: Arc<MetadataCache>) -> Self {
        Self {
            source,
            cache,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configure the per-lookup timeout (default: 12 seconds)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }

    /// Metadata for one movie.
    ///
    /// Served from the cache when possible. Failures and timeouts yield the
    /// fallback record with the reason attached; only successes are cached.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch(&self, movie_id: MovieId) -> Enrichment {
        if let Some(record) = self.cache.get(movie_id) {
            debug!("Metadata cache hit");
            return Enrichment::found(movie_id, record);
        }

        let result = tokio::time::timeout(self.timeout, self.source.fetch_details(movie_id))
            .await
            .unwrap_or(Err(MetadataError::Timeout(self.timeout)));

        match result {
            Ok(record) => {
                self.cache.insert(movie_id, record.clone());
                Enrichment::found(movie_id, record)
            }
            Err(e) => {
                warn!(error = %e, "Metadata lookup failed, using fallback");
                Enrichment::fallback(movie_id, e.to_string())
            }
        }
    }

    /// Look up several movies concurrently, one task per id.
    ///
    /// Results come back in the order of `movie_ids`. A failing or panicking
    /// lookup only degrades its own entry.
    pub async fn fetch_many(&self, movie_ids: &[MovieId]) -> Vec<Enrichment> {
        let handles: Vec<_> = movie_ids
            .iter()
            .map(|&movie_id| {
                let fetcher = self.clone();
                tokio::spawn(async move { fetcher.fetch(movie_id).await })
            })
            .collect();

        let mut enrichments = Vec::with_capacity(handles.len());
        for (handle, &movie_id) in handles.into_iter().zip(movie_ids) {
            match handle.await {
                Ok(enrichment) => enrichments.push(enrichment),
                Err(e) => {
                    error!(movie_id, error = %e, "Metadata task failed");
                    enrichments.push(Enrichment::fallback(
                        movie_id,
                        format!("Metadata task failed: {}", e),
                    ));
                }
            }
        }
        enrichments
    }
}
