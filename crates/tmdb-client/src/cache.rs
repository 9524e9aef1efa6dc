//! Process-lifetime metadata cache keyed by catalog id.
//!
//! There is no expiry and no invalidation. Two tasks racing on the same
//! miss may both fetch and insert; the second insert simply overwrites an
//! equivalent record.

use crate::types::EnrichmentRecord;
use data_loader::MovieId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<MovieId, EnrichmentRecord>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, movie_id: MovieId) -> Option<EnrichmentRecord> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&movie_id)
            .cloned()
    }

    pub fn insert(&self, movie_id: MovieId, record: EnrichmentRecord) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(movie_id, record);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
