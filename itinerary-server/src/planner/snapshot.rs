//! Refreshable topology snapshot.
//!
//! Searches take a private `Arc<Topology>` when they start and keep it for
//! their whole run. A refresh builds a brand-new topology and swaps the
//! shared pointer, so in-flight searches never observe it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{Storage, StoreError};

use super::topology::{GraphBuildError, Topology};

/// Error from loading a topology out of storage.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error(transparent)]
    Build(#[from] GraphBuildError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read all active locations and legs and build a topology from them.
pub async fn load_topology<S: Storage>(store: &S) -> Result<Topology, TopologyError> {
    let (locations, legs) =
        futures::try_join!(store.list_active_locations(), store.list_active_legs())?;
    let topology = Topology::build(&locations, &legs)?;

    debug!(
        locations = topology.location_count(),
        edges = topology.edge_count(),
        duplicates = topology.duplicate_legs(),
        "built topology"
    );

    Ok(topology)
}

/// Shared, atomically swapped topology snapshot.
///
/// Cloning is cheap and clones share the same snapshot.
#[derive(Clone, Default)]
pub struct TopologyCache {
    inner: Arc<RwLock<Option<Arc<Topology>>>>,
}

impl TopologyCache {
    /// Create an empty cache. The first `get_or_load` builds the snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding a snapshot built from `store`.
    pub async fn init<S: Storage>(store: &S) -> Result<Self, TopologyError> {
        let topology = load_topology(store).await?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(topology)))),
        })
    }

    /// The current snapshot, if one has been built.
    pub async fn current(&self) -> Option<Arc<Topology>> {
        self.inner.read().await.clone()
    }

    /// The current snapshot, building it from `store` if there is none.
    pub async fn get_or_load<S: Storage>(&self, store: &S) -> Result<Arc<Topology>, TopologyError> {
        if let Some(topology) = self.current().await {
            return Ok(topology);
        }

        let mut guard = self.inner.write().await;
        // Another caller may have built it while we waited for the lock
        if let Some(topology) = guard.as_ref() {
            return Ok(topology.clone());
        }
        let topology = Arc::new(load_topology(store).await?);
        *guard = Some(topology.clone());
        Ok(topology)
    }

    /// Build a fresh snapshot from `store` and swap it in.
    ///
    /// On failure the existing snapshot is preserved and the error is returned.
    pub async fn refresh<S: Storage>(&self, store: &S) -> Result<Arc<Topology>, TopologyError> {
        let topology = Arc::new(load_topology(store).await?);

        let mut guard = self.inner.write().await;
        *guard = Some(topology.clone());

        Ok(topology)
    }

    /// Release the snapshot. The next `get_or_load` rebuilds it.
    pub async fn teardown(&self) {
        self.inner.write().await.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, LegId, Location, LocationCode};
    use crate::store::{InMemoryStore, Snapshot};

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn snapshot(legs: Vec<Leg>) -> Snapshot {
        Snapshot {
            locations: ["LAX", "DFW", "JFK"]
                .iter()
                .map(|c| Location::new(code(c), *c))
                .collect(),
            legs,
            trips: vec![],
        }
    }

    #[tokio::test]
    async fn lazily_builds_once() {
        let store = InMemoryStore::new(snapshot(vec![Leg::new(LegId(1), code("LAX"), code("JFK"))]));
        let cache = TopologyCache::new();
        assert!(cache.current().await.is_none());

        let first = cache.get_or_load(&store).await.unwrap();
        let second = cache.get_or_load(&store).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.edge_count(), 1);
    }

    #[tokio::test]
    async fn refresh_swaps_but_held_snapshot_is_unchanged() {
        let store = InMemoryStore::new(snapshot(vec![Leg::new(LegId(1), code("LAX"), code("JFK"))]));
        let cache = TopologyCache::init(&store).await.unwrap();
        let held = cache.current().await.unwrap();

        store
            .replace(snapshot(vec![
                Leg::new(LegId(1), code("LAX"), code("JFK")),
                Leg::new(LegId(2), code("LAX"), code("DFW")),
            ]))
            .await;
        let refreshed = cache.refresh(&store).await.unwrap();

        assert_eq!(held.edge_count(), 1);
        assert_eq!(refreshed.edge_count(), 2);
        assert_eq!(cache.current().await.unwrap().edge_count(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let store = InMemoryStore::new(snapshot(vec![Leg::new(LegId(1), code("LAX"), code("JFK"))]));
        let cache = TopologyCache::init(&store).await.unwrap();

        store
            .replace(snapshot(vec![Leg::new(LegId(3), code("LAX"), code("ORD"))]))
            .await;
        let err = cache.refresh(&store).await.unwrap_err();

        assert!(matches!(
            err,
            TopologyError::Build(GraphBuildError::UnknownLocation { .. })
        ));
        let current = cache.current().await.unwrap();
        assert!(current.has_edge(&code("LAX"), &code("JFK")));
    }

    #[tokio::test]
    async fn teardown_releases_snapshot() {
        let store = InMemoryStore::new(snapshot(vec![]));
        let cache = TopologyCache::init(&store).await.unwrap();
        let clone = cache.clone();

        cache.teardown().await;
        assert!(clone.current().await.is_none());

        clone.get_or_load(&store).await.unwrap();
        assert!(cache.current().await.is_some());
    }

    #[tokio::test]
    async fn init_fails_on_inconsistent_snapshot() {
        let store = InMemoryStore::new(snapshot(vec![Leg::new(LegId(3), code("SEA"), code("JFK"))]));
        assert!(TopologyCache::init(&store).await.is_err());
    }
}
