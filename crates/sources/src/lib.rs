//! # Sources Crate
//!
//! Candidate generation for "more like this" recommendations.
//!
//! ## Components
//!
//! ### Top-k selection
//! [`select_top_k`] picks the highest-scoring neighbors of one movie from its
//! similarity row, never returning the movie itself. It partitions in O(N)
//! and only sorts the k selected entries.
//!
//! ### Similarity Source
//! [`SimilaritySource`] runs the selection against a shared
//! [`SimilarityStore`](data_loader::SimilarityStore) and returns
//! [`Candidate`]s with catalog ids and scores.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::SimilaritySource;
//! use data_loader::SimilarityStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SimilarityStore::load_from_files("data/sample".as_ref())?);
//! let source = SimilaritySource::new(store.clone());
//!
//! let row = store.index_of_title("Avatar").unwrap();
//! let candidates = source.get_candidates(row, 5)?;
//! ```

// Public modules
pub mod types;
pub mod topk;
pub mod similar;

// Re-export commonly used types
pub use types::Candidate;
pub use topk::{rank_all, select_top_k};
pub use similar::SimilaritySource;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{MovieRecord, SimilarityMatrix, SimilarityStore};
    use std::sync::Arc;

    fn create_test_store() -> Arc<SimilarityStore> {
        let records = vec![
            MovieRecord::new(100, "Query"),
            MovieRecord::new(200, "Close"),
            MovieRecord::new(300, "Closer"),
            MovieRecord::new(400, "Far"),
        ];
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.6, 0.8, 0.1],
            vec![0.6, 1.0, 0.5, 0.2],
            vec![0.8, 0.5, 1.0, 0.3],
            vec![0.1, 0.2, 0.3, 1.0],
        ])
        .unwrap();
        Arc::new(SimilarityStore::load(records, matrix).unwrap())
    }

    #[test]
    fn test_candidates_map_rows_to_movie_ids() {
        let source = SimilaritySource::new(create_test_store());

        let candidates = source.get_candidates(0, 2).unwrap();
        assert_eq!(
            candidates,
            vec![Candidate::new(2, 300, 0.8), Candidate::new(1, 200, 0.6)]
        );
    }

    #[test]
    fn test_candidates_never_include_query() {
        let source = SimilaritySource::new(create_test_store());

        for row in 0..4 {
            let candidates = source.get_candidates(row, 10).unwrap();
            assert_eq!(candidates.len(), 3);
            assert!(candidates.iter().all(|c| c.row != row));
        }
    }

    #[test]
    fn test_candidates_out_of_bounds_row() {
        let source = SimilaritySource::new(create_test_store());
        assert!(source.get_candidates(4, 2).is_err());
    }

    #[test]
    fn test_batch_preserves_order() {
        let source = SimilaritySource::new(create_test_store());

        let results = source.get_candidates_batch(&[3, 0, 9], 1);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].movie_id, 300);
        assert_eq!(results[1].as_ref().unwrap()[0].movie_id, 300);
        assert!(results[2].is_err());
    }
}
