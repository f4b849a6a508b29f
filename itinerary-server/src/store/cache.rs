//! Read-through cache for storage lookups.
//!
//! Leg lookups and trip-window queries repeat heavily across the paths of
//! a single search (every path sharing a first hop issues the same query)
//! and across searches for the same day. Both are cached with a short TTL.
//! Location and leg listings pass straight through: they only feed topology
//! builds, which have their own snapshot lifecycle.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Leg, LegId, Location, LocationCode, Trip, Window};

use super::Storage;
use super::error::StoreError;

/// Cache key for trip queries: (leg, departure window).
type TripsKey = (LegId, Window);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// Storage wrapper that caches `find_leg` hits and `find_trips` results.
///
/// Misses on `find_leg` are not cached, so a leg added to storage becomes
/// resolvable immediately. Hits are: a leg deactivated in storage keeps
/// resolving until its entry expires or `invalidate` runs, so paths through
/// it are only dropped as unresolved once the cache has been cleared.
/// `AppState::refresh` clears it before rebuilding the topology.
pub struct CachedStore<S> {
    inner: S,
    legs: MokaCache<(LocationCode, LocationCode), Leg>,
    trips: MokaCache<TripsKey, Arc<Vec<Trip>>>,
}

impl<S: Storage> CachedStore<S> {
    /// Wrap `inner` with caches built from `config`.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let legs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let trips = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, legs, trips }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate(&self) {
        self.legs.invalidate_all();
        self.trips.invalidate_all();
    }
}

impl<S: Storage> Storage for CachedStore<S> {
    async fn list_active_locations(&self) -> Result<Vec<Location>, StoreError> {
        self.inner.list_active_locations().await
    }

    async fn list_active_legs(&self) -> Result<Vec<Leg>, StoreError> {
        self.inner.list_active_legs().await
    }

    async fn find_leg(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<Option<Leg>, StoreError> {
        let key = (*origin, *destination);
        if let Some(leg) = self.legs.get(&key).await {
            return Ok(Some(leg));
        }

        let leg = self.inner.find_leg(origin, destination).await?;
        if let Some(leg) = leg {
            self.legs.insert(key, leg).await;
        }
        Ok(leg)
    }

    async fn find_trips(&self, leg: &Leg, window: Window) -> Result<Vec<Trip>, StoreError> {
        let key = (leg.id, window);
        if let Some(cached) = self.trips.get(&key).await {
            return Ok((*cached).clone());
        }

        let trips = self.inner.find_trips(leg, window).await?;
        self.trips.insert(key, Arc::new(trips.clone())).await;
        Ok(trips)
    }
}
