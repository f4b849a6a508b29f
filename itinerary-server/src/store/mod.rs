//! Read-only storage seam for the search core.
//!
//! The planner never talks to a database directly; it consumes the four
//! reads below. `InMemoryStore` serves a snapshot loaded from JSON and
//! `CachedStore` wraps any backend with a read-through cache.

mod cache;
mod error;
mod memory;

use std::future::Future;

use crate::domain::{Leg, Location, LocationCode, Trip, Window};

pub use cache::{CacheConfig, CachedStore};
pub use error::StoreError;
pub use memory::{InMemoryStore, Snapshot};

/// Trait for reading locations, legs and trips.
///
/// This abstraction allows the planner to be tested with mock data and
/// to run against any backend that supports concurrent reads.
pub trait Storage: Send + Sync {
    /// All active locations.
    fn list_active_locations(
        &self,
    ) -> impl Future<Output = Result<Vec<Location>, StoreError>> + Send;

    /// All active legs.
    fn list_active_legs(&self) -> impl Future<Output = Result<Vec<Leg>, StoreError>> + Send;

    /// The active leg serving `origin` → `destination`, if one exists.
    fn find_leg(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> impl Future<Output = Result<Option<Leg>, StoreError>> + Send;

    /// Active trips on `leg` departing within `window`.
    fn find_trips(
        &self,
        leg: &Leg,
        window: Window,
    ) -> impl Future<Output = Result<Vec<Trip>, StoreError>> + Send;
}
