//! In-memory storage backed by a JSON snapshot.
//!
//! Useful for development, tests, and small deployments where the whole
//! schedule fits in memory.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::{Leg, LegId, Location, LocationCode, Trip, Window};

use super::Storage;
use super::error::StoreError;

/// Point-in-time contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Storage that serves a snapshot held in memory.
///
/// Cloning is cheap and clones share the same data, so a test can keep a
/// handle and mutate the store while a planner reads from it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<Snapshot>>,
}

impl InMemoryStore {
    /// Create a store serving `snapshot`.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            data: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Create a store from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(Snapshot::from_file(path)?))
    }

    /// Replace the whole snapshot.
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.data.write().await = snapshot;
    }

    /// Mark a leg inactive. Returns false if no such leg exists.
    pub async fn deactivate_leg(&self, id: LegId) -> bool {
        let mut data = self.data.write().await;
        match data.legs.iter_mut().find(|l| l.id == id) {
            Some(leg) => {
                leg.is_active = false;
                true
            }
            None => false,
        }
    }
}

impl Storage for InMemoryStore {
    async fn list_active_locations(&self) -> Result<Vec<Location>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .locations
            .iter()
            .filter(|l| l.is_active)
            .cloned()
            .collect())
    }

    async fn list_active_legs(&self) -> Result<Vec<Leg>, StoreError> {
        let data = self.data.read().await;
        Ok(data.legs.iter().filter(|l| l.is_active).copied().collect())
    }

    async fn find_leg(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<Option<Leg>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .legs
            .iter()
            .find(|l| l.is_active && l.serves(origin, destination))
            .copied())
    }

    async fn find_trips(&self, leg: &Leg, window: Window) -> Result<Vec<Trip>, StoreError> {
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let data = self.data.read().await;
        let mut trips: Vec<Trip> = data
            .trips
            .iter()
            .filter(|t| t.is_active && t.leg == leg.id && window.contains(t.departure))
            .cloned()
            .collect();
        trips.sort_by(|a, b| a.departure.cmp(&b.departure).then(a.id.cmp(&b.id)));
        Ok(trips)
    }
}
