//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::{Planner, SearchError, Topology};
use crate::store::{CachedStore, InMemoryStore};

/// Planner as served over HTTP: an in-memory snapshot behind a read-through cache.
pub type AppPlanner = Planner<CachedStore<InMemoryStore>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<AppPlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: AppPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    /// Drop cached storage reads and rebuild the topology.
    pub async fn refresh(&self) -> Result<Arc<Topology>, SearchError> {
        self.planner.store().invalidate();
        self.planner.refresh_topology().await
    }
}
