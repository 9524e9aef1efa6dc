//! Core domain types for the similarity dataset.
//!
//! The dataset is two artifacts that must stay index-aligned: an ordered list
//! of movie records and a dense N×N similarity matrix. Row `i` of the matrix
//! describes the movie at position `i` of the record list.

use crate::error::{DataLoadError, Result};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// External catalog identifier (a TMDB movie id)
pub type MovieId = u32;

/// Position of a movie in the record list, and of its row in the matrix
pub type RowIndex = usize;

// =============================================================================
// Movie Records
// =============================================================================

/// A movie as listed in the dataset.
///
/// The title is the lookup key used by the selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
}

impl MovieRecord {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense, square matrix of similarity scores stored row-major.
///
/// Not assumed to be symmetric: `score(i, j)` is the similarity of movie `i`
/// to movie `j` and may differ from `score(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Fails with `NonSquareMatrix` when any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dimension {
                return Err(DataLoadError::NonSquareMatrix {
                    row,
                    expected: dimension,
                    found: values.len(),
                });
            }
            scores.extend(values);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Borrow one row of scores, or `None` if out of bounds
    pub fn row(&self, index: RowIndex) -> Option<&[f32]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    /// Single score lookup
    pub fn score(&self, from: RowIndex, to: RowIndex) -> Option<f32> {
        self.row(from)?.get(to).copied()
    }
}

// =============================================================================
// SimilarityStore - The In-Memory Dataset
// =============================================================================

/// Owns the movie records, the similarity matrix and a title index.
///
/// Read-only after construction; share it across tasks with `Arc`.
#[derive(Debug)]
pub struct SimilarityStore {
    pub(crate) records: Vec<MovieRecord>,
    pub(crate) matrix: SimilarityMatrix,
    /// Exact title -> first row carrying that title
    pub(crate) title_index: HashMap<String, RowIndex>,
}

impl SimilarityStore {
    /// Look up the row index of a title (exact match).
    ///
    /// An unknown title is not an error; the caller decides what to do.
    pub fn index_of_title(&self, title: &str) -> Option<RowIndex> {
        self.title_index.get(title).copied()
    }

    /// Similarity row for a movie
    pub fn row_for(&self, index: RowIndex) -> Result<&[f32]> {
        self.matrix
            .row(index)
            .ok_or(DataLoadError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            })
    }

    /// Record at a row index
    pub fn record(&self, index: RowIndex) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    /// All records in row order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Titles in row order, suitable for a selection list
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Number of movies in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
