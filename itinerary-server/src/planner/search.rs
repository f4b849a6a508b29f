//! Itinerary search orchestration.
//!
//! Takes a topology snapshot, enumerates candidate paths, and fans out one
//! task per path to resolve its legs and assemble itineraries. Per-path
//! failures that only mean "this path doesn't exist any more" are absorbed;
//! anything that would make the union of paths incomplete fails the search.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::domain::{Itinerary, LocationCode, Window};
use crate::store::{Storage, StoreError};

use super::assemble::assemble;
use super::config::SearchConfig;
use super::paths::{Path, enumerate_paths};
use super::rank::rank_itineraries;
use super::resolve::{ResolveError, resolve_path};
use super::snapshot::{TopologyCache, TopologyError};
use super::topology::{GraphBuildError, Topology};

/// Error from itinerary search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Origin or destination is not a known location
    #[error("unknown location: {0}")]
    NotFound(LocationCode),

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// Topology could not be built from storage
    #[error("inconsistent topology snapshot: {0}")]
    GraphBuild(#[from] GraphBuildError),

    /// Storage failed during the search
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Search was cancelled or exceeded its deadline
    #[error("search cancelled")]
    Cancelled,
}

impl From<TopologyError> for SearchError {
    fn from(e: TopologyError) -> Self {
        match e {
            TopologyError::Build(e) => SearchError::GraphBuild(e),
            TopologyError::Store(e) => SearchError::Store(e),
        }
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: LocationCode,
    pub destination: LocationCode,

    /// Earliest departure of the first trip.
    pub window_start: DateTime<Utc>,

    /// Width of the departure window; defaults to `SearchConfig::window_span`.
    pub window_span: Option<Duration>,

    /// Maximum hops; defaults to `SearchConfig::max_hops`.
    pub max_hops: Option<usize>,
}

impl SearchRequest {
    /// Create a new search request using the configured defaults.
    pub fn new(origin: LocationCode, destination: LocationCode, window_start: DateTime<Utc>) -> Self {
        Self {
            origin,
            destination,
            window_start,
            window_span: None,
            max_hops: None,
        }
    }

    pub fn with_window_span(mut self, span: Duration) -> Self {
        self.window_span = Some(span);
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    /// Validate the search request.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_hops == Some(0) {
            return Err(SearchError::InvalidRequest(
                "max_hops must be at least 1".to_string(),
            ));
        }

        if let Some(span) = self.window_span {
            if span <= Duration::zero() {
                return Err(SearchError::InvalidRequest(
                    "window span must be positive".to_string(),
                ));
            }
            if Window::try_spanning(self.window_start, span).is_none() {
                return Err(SearchError::InvalidRequest(
                    "window span out of range".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found itineraries: fewest hops first, then earliest departure.
    pub itineraries: Vec<Itinerary>,

    /// Number of candidate paths found in the topology.
    pub paths_explored: usize,

    /// Number of paths dropped because a hop no longer resolved to a leg.
    pub paths_unresolved: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            paths_explored: 0,
            paths_unresolved: 0,
        }
    }
}

/// What became of one candidate path.
enum PathOutcome {
    Assembled(Vec<Itinerary>),
    Unresolved,
}

/// Itinerary planner over a storage backend.
pub struct Planner<S> {
    store: Arc<S>,
    topology: TopologyCache,
    config: SearchConfig,
}

impl<S: Storage> Planner<S> {
    /// Create a planner. The topology is built on the first search.
    pub fn new(store: Arc<S>, config: SearchConfig) -> Self {
        Self::with_topology(store, TopologyCache::new(), config)
    }

    /// Create a planner sharing an existing topology cache.
    pub fn with_topology(store: Arc<S>, topology: TopologyCache, config: SearchConfig) -> Self {
        Self {
            store,
            topology,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The current topology snapshot, building it if needed.
    pub async fn topology(&self) -> Result<Arc<Topology>, SearchError> {
        Ok(self.topology.get_or_load(self.store.as_ref()).await?)
    }

    /// Rebuild the topology from storage and swap it in for later searches.
    pub async fn refresh_topology(&self) -> Result<Arc<Topology>, SearchError> {
        Ok(self.topology.refresh(self.store.as_ref()).await?)
    }

    /// Search for itineraries, bounded by the configured deadline.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        match tokio::time::timeout(self.config.timeout(), self.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    origin = %request.origin,
                    destination = %request.destination,
                    "search exceeded deadline"
                );
                Err(SearchError::Cancelled)
            }
        }
    }

    /// Search for itineraries, giving up as soon as `cancel` completes.
    ///
    /// In-flight storage reads are dropped with the search; no partial
    /// result is returned.
    pub async fn search_until<F>(
        &self,
        request: &SearchRequest,
        cancel: F,
    ) -> Result<SearchResult, SearchError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(SearchError::Cancelled),
            result = self.search(request) => result,
        }
    }

    async fn run(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        request.validate()?;

        // Held for the whole search; a concurrent refresh doesn't affect it
        let topology = self.topology().await?;
        for code in [&request.origin, &request.destination] {
            if !topology.contains(code) {
                return Err(SearchError::NotFound(*code));
            }
        }

        let max_hops = request.max_hops.unwrap_or(self.config.max_hops);
        let span = request.window_span.unwrap_or_else(|| self.config.window_span());
        let window = Window::spanning(request.window_start, span);

        let paths = enumerate_paths(&topology, &request.origin, &request.destination, max_hops);
        if paths.is_empty() {
            debug!(
                origin = %request.origin,
                destination = %request.destination,
                max_hops,
                "no paths in topology"
            );
            return Ok(SearchResult::empty());
        }

        let mut itineraries = Vec::new();
        let mut paths_unresolved = 0;

        for batch in paths.chunks(self.config.batch_size.max(1)) {
            let outcomes = try_join_all(batch.iter().map(|path| self.expand(path, window))).await?;

            for outcome in outcomes {
                match outcome {
                    PathOutcome::Assembled(found) => itineraries.extend(found),
                    PathOutcome::Unresolved => paths_unresolved += 1,
                }
            }
        }

        let itineraries = rank_itineraries(itineraries);

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            paths = paths.len(),
            unresolved = paths_unresolved,
            itineraries = itineraries.len(),
            "search complete"
        );

        Ok(SearchResult {
            itineraries,
            paths_explored: paths.len(),
            paths_unresolved,
        })
    }

    /// Resolve and assemble a single path.
    async fn expand(&self, path: &Path, window: Window) -> Result<PathOutcome, SearchError> {
        let legs = match resolve_path(self.store.as_ref(), path).await {
            Ok(legs) => legs,
            Err(ResolveError::RouteNotResolved {
                origin,
                destination,
            }) => {
                warn!(
                    path = %path,
                    %origin,
                    %destination,
                    "dropping path: hop no longer resolves to a leg"
                );
                return Ok(PathOutcome::Unresolved);
            }
            Err(ResolveError::Store(e)) => return Err(e.into()),
        };

        let found = assemble(self.store.as_ref(), &legs, window).await?;
        Ok(PathOutcome::Assembled(found))
    }
}
