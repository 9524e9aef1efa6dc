//! Types shared by candidate generation and its consumers.

use data_loader::{MovieId, RowIndex};

/// A movie proposed as similar to the query movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Row of the candidate in the similarity store
    pub row: RowIndex,
    pub movie_id: MovieId,
    /// Similarity of the query movie to this candidate
    pub score: f32,
}

impl Candidate {
    pub fn new(row: RowIndex, movie_id: MovieId, score: f32) -> Self {
        Self {
            row,
            movie_id,
            score,
        }
    }
}
