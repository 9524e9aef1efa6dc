//! Error types for the data-loader crate.
//!
//! Schema and bounds violations are fatal at load time.

use thiserror::Error;

/// Errors that can occur while loading or querying the similarity dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The record list and the similarity matrix disagree in size
    #[error("Schema mismatch: {records} movie records but similarity matrix has dimension {dimension}")]
    SchemaMismatch { records: usize, dimension: usize },

    /// A matrix row does not have one score per row of the matrix
    #[error("Similarity matrix is not square: row {row} has {found} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Row index outside of the loaded dataset
    #[error("Row index {index} out of bounds for dataset of {len} movies")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
