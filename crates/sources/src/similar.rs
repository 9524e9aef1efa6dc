//! Similar-movie candidate source.
//!
//! Turns the indices picked by [`select_top_k`] into [`Candidate`]s carrying
//! the catalog id and score of each neighbor.

use crate::topk::select_top_k;
use crate::types::Candidate;
use data_loader::{Result, RowIndex, SimilarityStore};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates nearest-neighbor candidates from the similarity store
#[derive(Clone)]
pub struct SimilaritySource {
    /// Shared reference to the dataset
    store: Arc<SimilarityStore>,
}

impl SimilaritySource {
    pub fn new(store: Arc<SimilarityStore>) -> Self {
        Self { store }
    }

    /// Up to `limit` movies most similar to the movie at `row`, best first.
    ///
    /// Fails only if `row` is outside the dataset.
    #[instrument(skip(self))]
    pub fn get_candidates(&self, row: RowIndex, limit: usize) -> Result<Vec<Candidate>> {
        let scores = self.store.row_for(row)?;

        let candidates: Vec<Candidate> = select_top_k(scores, row, limit)
            .into_iter()
            .filter_map(|neighbor| {
                let record = self.store.record(neighbor)?;
                Some(Candidate::new(neighbor, record.id, scores[neighbor]))
            })
            .collect();

        debug!("Selected {} similar movies for row {}", candidates.len(), row);
        Ok(candidates)
    }

    /// Candidates for many query rows at once, computed in parallel.
    ///
    /// Results are in the same order as `rows`.
    pub fn get_candidates_batch(
        &self,
        rows: &[RowIndex],
        limit: usize,
    ) -> Vec<Result<Vec<Candidate>>> {
        rows.par_iter()
            .map(|&row| self.get_candidates(row, limit))
            .collect()
    }
}
