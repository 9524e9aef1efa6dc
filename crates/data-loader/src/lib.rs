//! # Data Loader Crate
//!
//! Loads the precomputed similarity dataset: an ordered list of movie
//! records and the dense similarity matrix aligned with it.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, SimilarityMatrix, SimilarityStore)
//! - **parser**: Parse the .dat files into Rust structs
//! - **store**: Build the store, validate it and look titles up
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::SimilarityStore;
//! use std::path::Path;
//!
//! let store = SimilarityStore::load_from_files(Path::new("data/sample"))?;
//!
//! let row = store.index_of_title("Avatar").unwrap();
//! let scores = store.row_for(row)?;
//! println!("{} has {} similarity scores", store.records()[row].title, scores.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use store::{MATRIX_FILE, RECORDS_FILE};
pub use types::{
    // Type aliases
    MovieId,
    RowIndex,
    // Core types
    MovieRecord,
    SimilarityMatrix,
    SimilarityStore,
};
