//! # Recommendation Orchestrator
//!
//! Coordinates a "more like this" request:
//! 1. Resolve the selected title to its row in the similarity store
//! 2. Select the top-k most similar movies (excluding the title itself)
//! 3. Map rows back to catalog ids, keeping the score order
//! 4. Optionally enrich every id with TMDB metadata in parallel
//!
//! Unknown titles and failed metadata lookups are not errors. They come back
//! as [`Advisory`] messages next to whatever results could be produced.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use data_loader::{MovieId, SimilarityStore};
use sources::{Candidate, SimilaritySource};
use tmdb_client::{EnrichmentRecord, MetadataCache, MetadataFetcher, TmdbClient};

use crate::config::Config;

/// Non-fatal, user-visible message attached to a result
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// The selected title is not part of the dataset
    NotFound { title: String },
    /// Metadata for one recommendation could not be loaded
    Enrichment {
        movie_id: MovieId,
        title: String,
        reason: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NotFound { title } => {
                write!(f, "Selected movie {:?} not found in dataset", title)
            }
            Advisory::Enrichment {
                movie_id,
                title,
                reason,
            } => write!(
                f,
                "Could not load details for {} (id {}): {}",
                title, movie_id, reason
            ),
        }
    }
}

/// Similar movies for one title, before enrichment
#[derive(Debug, Clone)]
pub struct Recommendations {
    pub query: String,
    /// Best first
    pub candidates: Vec<Candidate>,
    pub advisories: Vec<Advisory>,
}

impl Recommendations {
    /// Catalog ids in recommendation order
    pub fn movie_ids(&self) -> Vec<MovieId> {
        self.candidates.iter().map(|c| c.movie_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// One rendered recommendation
#[derive(Debug, Clone)]
pub struct MovieCard {
    pub movie_id: MovieId,
    pub score: f32,
    pub details: EnrichmentRecord,
}

/// Similar movies for one title, with display metadata
#[derive(Debug, Clone)]
pub struct EnrichedRecommendations {
    pub query: String,
    pub cards: Vec<MovieCard>,
    pub advisories: Vec<Advisory>,
}

/// Main orchestrator that coordinates the recommendation flow
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    store: Arc<SimilarityStore>,
    source: SimilaritySource,
    fetcher: MetadataFetcher,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator around a loaded store and a metadata fetcher
    pub fn new(store: Arc<SimilarityStore>, fetcher: MetadataFetcher) -> Self {
        let source = SimilaritySource::new(store.clone());
        Self {
            store,
            source,
            fetcher,
        }
    }

    /// Create an orchestrator that enriches results from TMDB
    pub fn from_config(store: Arc<SimilarityStore>, config: &Config) -> Result<Self> {
        let client = TmdbClient::new(config.tmdb_config()).context("Failed to build TMDB client")?;
        let fetcher = MetadataFetcher::new(Arc::new(client), Arc::new(MetadataCache::new()))
            .with_timeout(config.metadata_timeout());
        Ok(Self::new(store, fetcher))
    }

    pub fn store(&self) -> &Arc<SimilarityStore> {
        &self.store
    }

    /// Up to `k` movies similar to `title`, best first.
    ///
    /// An unknown title yields an empty result with an
    /// [`Advisory::NotFound`]. The query movie is never part of the result.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Recommendations> {
        let start_time = Instant::now();

        let Some(row) = self.store.index_of_title(title) else {
            warn!("Selected movie {:?} not found in dataset", title);
            return Ok(Recommendations {
                query: title.to_string(),
                candidates: Vec::new(),
                advisories: vec![Advisory::NotFound {
                    title: title.to_string(),
                }],
            });
        };

        let candidates = self
            .source
            .get_candidates(row, k)
            .with_context(|| format!("Failed to select similar movies for {:?}", title))?;

        info!(
            "Selected {} similar movies for {:?} in {:.2?}",
            candidates.len(),
            title,
            start_time.elapsed()
        );

        Ok(Recommendations {
            query: title.to_string(),
            candidates,
            advisories: Vec::new(),
        })
    }

    /// Like [`recommend`](Self::recommend), then fetch metadata for every
    /// result in parallel.
    ///
    /// Failed lookups keep their place in the list with fallback values and
    /// the dataset title, and add an [`Advisory::Enrichment`].
    pub async fn recommend_enriched(&self, title: &str, k: usize) -> Result<EnrichedRecommendations> {
        let start_time = Instant::now();
        let recommendations = self.recommend(title, k)?;
        let enrichments = self.fetcher.fetch_many(&recommendations.movie_ids()).await;
        let mut advisories = recommendations.advisories;

        let mut cards = Vec::with_capacity(enrichments.len());
        for (candidate, enrichment) in recommendations.candidates.iter().zip(enrichments) {
            let dataset_title = self
                .store
                .record(candidate.row)
                .map(|r| r.title.clone())
                .unwrap_or_default();

            let mut details = enrichment.record;
            if let Some(reason) = enrichment.advisory {
                details.title = dataset_title.clone();
                advisories.push(Advisory::Enrichment {
                    movie_id: candidate.movie_id,
                    title: dataset_title,
                    reason,
                });
            }

            cards.push(MovieCard {
                movie_id: candidate.movie_id,
                score: candidate.score,
                details,
            });
        }

        info!(
            "Built {} cards for {:?} ({} advisories) in {:.2?}",
            cards.len(),
            title,
            advisories.len(),
            start_time.elapsed()
        );

        Ok(EnrichedRecommendations {
            query: recommendations.query,
            cards,
            advisories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{MovieRecord, SimilarityMatrix};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tmdb_client::{MetadataError, MetadataSource};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Five movies; row 0 mirrors the [0.1, 0.9, 0.9, 0.2, 0.05] scenario
    fn build_test_store() -> Arc<SimilarityStore> {
        let records = vec![
            MovieRecord::new(19995, "Avatar"),
            MovieRecord::new(285, "Pirates of the Caribbean: At World's End"),
            MovieRecord::new(206647, "Spectre"),
            MovieRecord::new(49026, "The Dark Knight Rises"),
            MovieRecord::new(49529, "John Carter"),
        ];
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![0.1, 0.9, 0.9, 0.2, 0.05],
            vec![0.3, 1.0, 0.1, 0.2, 0.6],
            vec![0.2, 0.1, 1.0, 0.7, 0.0],
            vec![0.2, 0.2, 0.7, 1.0, 0.1],
            vec![0.5, 0.6, 0.0, 0.1, 1.0],
        ])
        .unwrap();
        Arc::new(SimilarityStore::load(records, matrix).unwrap())
    }

    /// Mock metadata source: fails for the ids in `failing`
    struct MockSource {
        failing: HashSet<MovieId>,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new(failing: &[MovieId]) -> Self {
            Self {
                failing: failing.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl MetadataSource for MockSource {
        async fn fetch_details(&self, movie_id: MovieId) -> Result<EnrichmentRecord, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&movie_id) {
                return Err(MetadataError::HttpStatus { status: 503, movie_id });
            }
            Ok(EnrichmentRecord {
                poster: format!("https://img.test/{}.jpg", movie_id),
                title: format!("TMDB {}", movie_id),
                rating: 7.5,
                year: "2012".to_string(),
                genres: "Action".to_string(),
                trailer: "#".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn build_test_orchestrator(source: Arc<MockSource>) -> RecommendationOrchestrator {
        let fetcher = MetadataFetcher::new(source, Arc::new(MetadataCache::new()));
        RecommendationOrchestrator::new(build_test_store(), fetcher)
    }

    // ============================================================================
    // Unit Tests: recommend
    // ============================================================================

    #[test]
    fn test_recommend_picks_tied_best_in_index_order() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[])));

        let recs = orchestrator.recommend("Avatar", 2).unwrap();

        assert_eq!(recs.movie_ids(), vec![285, 206647]);
        assert!(recs.advisories.is_empty());
    }

    #[test]
    fn test_recommend_never_returns_query() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[])));

        for title in orchestrator.store().titles().map(str::to_string).collect::<Vec<_>>() {
            let own_id = orchestrator.store().records()[orchestrator.store().index_of_title(&title).unwrap()].id;
            let recs = orchestrator.recommend(&title, 10).unwrap();

            assert_eq!(recs.candidates.len(), 4, "clamped to N - 1");
            assert!(!recs.movie_ids().contains(&own_id));
            let unique: HashSet<_> = recs.movie_ids().into_iter().collect();
            assert_eq!(unique.len(), 4);
            assert!(recs.candidates.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_recommend_unknown_title() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[])));

        let recs = orchestrator.recommend("Not A Movie", 5).unwrap();

        assert!(recs.is_empty());
        assert_eq!(
            recs.advisories,
            vec![Advisory::NotFound { title: "Not A Movie".to_string() }]
        );
    }

    #[test]
    fn test_recommend_zero_k() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[])));
        assert!(orchestrator.recommend("Spectre", 0).unwrap().is_empty());
    }

    // ============================================================================
    // Unit Tests: recommend_enriched
    // ============================================================================

    #[tokio::test]
    async fn test_enriched_cards_follow_recommendation_order() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[])));

        let result = orchestrator.recommend_enriched("Spectre", 2).await.unwrap();

        let ids: Vec<_> = result.cards.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![49026, 19995]);
        assert_eq!(result.cards[0].details.title, "TMDB 49026");
        assert_eq!(result.cards[0].score, 0.7);
        assert!(result.advisories.is_empty());
    }

    #[tokio::test]
    async fn test_enrichment_failure_degrades_single_card() {
        let orchestrator = build_test_orchestrator(Arc::new(MockSource::new(&[206647])));

        let result = orchestrator.recommend_enriched("Avatar", 3).await.unwrap();

        assert_eq!(result.cards.len(), 3);
        let failed = &result.cards[1];
        assert_eq!(failed.movie_id, 206647);
        assert_eq!(failed.details.title, "Spectre", "fallback uses the dataset title");
        assert_eq!(failed.details.rating, 0.0);
        assert_eq!(failed.details.trailer, "#");
        assert_eq!(result.cards[0].details.title, "TMDB 285");

        assert_eq!(result.advisories.len(), 1);
        match &result.advisories[0] {
            Advisory::Enrichment { movie_id, title, reason } => {
                assert_eq!(*movie_id, 206647);
                assert_eq!(title, "Spectre");
                assert!(reason.contains("503"));
            }
            other => panic!("unexpected advisory: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enriched_unknown_title_makes_no_requests() {
        let source = Arc::new(MockSource::new(&[]));
        let orchestrator = build_test_orchestrator(source.clone());

        let result = orchestrator.recommend_enriched("Missing", 5).await.unwrap();

        assert!(result.cards.is_empty());
        assert!(matches!(result.advisories[0], Advisory::NotFound { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_requests_use_cache() {
        let source = Arc::new(MockSource::new(&[]));
        let orchestrator = build_test_orchestrator(source.clone());

        orchestrator.recommend_enriched("Avatar", 2).await.unwrap();
        orchestrator.recommend_enriched("Avatar", 2).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_advisory_messages() {
        let not_found = Advisory::NotFound { title: "Nope".to_string() };
        assert_eq!(not_found.to_string(), "Selected movie \"Nope\" not found in dataset");

        let enrichment = Advisory::Enrichment {
            movie_id: 1,
            title: "Avatar".to_string(),
            reason: "Request timed out after 12s".to_string(),
        };
        assert!(enrichment.to_string().contains("Avatar (id 1)"));
    }

    #[test]
    fn test_from_config_builds_tmdb_orchestrator() {
        let config = Config::from_vars(Vec::new()).unwrap();
        let orchestrator = RecommendationOrchestrator::from_config(build_test_store(), &config);
        assert!(orchestrator.is_ok());
    }
}
