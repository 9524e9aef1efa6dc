//! Building the SimilarityStore and querying it by title.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Records file inside a dataset directory
pub const RECORDS_FILE: &str = "movies.dat";

/// Matrix file inside a dataset directory
pub const MATRIX_FILE: &str = "similarity.dat";

impl SimilarityStore {
    /// Assemble a store from already-parsed artifacts.
    ///
    /// Fails with `SchemaMismatch` if the matrix dimension differs from the
    /// number of records. The matrix is square by construction.
    pub fn load(records: Vec<MovieRecord>, matrix: SimilarityMatrix) -> Result<Self> {
        if matrix.dimension() != records.len() {
            return Err(DataLoadError::SchemaMismatch {
                records: records.len(),
                dimension: matrix.dimension(),
            });
        }

        let title_index = build_title_index(&records);

        Ok(Self {
            records,
            matrix,
            title_index,
        })
    }

    /// Load a dataset directory containing `movies.dat` and `similarity.dat`.
    ///
    /// Both files are parsed in parallel.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading similarity dataset from {:?}", data_dir);

        let records_path = data_dir.join(RECORDS_FILE);
        let matrix_path = data_dir.join(MATRIX_FILE);

        let (records, matrix) = rayon::join(
            || parser::parse_records(&records_path),
            || parser::parse_matrix(&matrix_path),
        );
        let records = records?;
        let matrix = matrix?;

        info!(
            "Loaded {} movie records and a {}x{} similarity matrix",
            records.len(),
            matrix.dimension(),
            matrix.dimension()
        );

        Self::load(records, matrix)
    }

    /// Case-insensitive title search.
    ///
    /// Exact matches come first, then substring matches, each group in row
    /// order. Returns at most `limit` row indices.
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<RowIndex> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut partial = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            let title = record.title.to_lowercase();
            if title == query {
                exact.push(index);
            } else if title.contains(&query) {
                partial.push(index);
            }
        }

        exact.into_iter().chain(partial).take(limit).collect()
    }
}

/// Map each title to the first row that carries it
fn build_title_index(records: &[MovieRecord]) -> HashMap<String, RowIndex> {
    let mut index = HashMap::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        if let Some(&first) = index.get(&record.title) {
            warn!(
                "Duplicate title {:?} at row {} (keeping row {})",
                record.title, row, first
            );
            continue;
        }
        index.insert(record.title.clone(), row);
    }
    index
}
