use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use itinerary_server::planner::{Planner, SearchConfig, TopologyCache};
use itinerary_server::store::{CacheConfig, CachedStore, InMemoryStore, Snapshot};
use itinerary_server::web::{AppState, create_router};

/// Default interval between topology refreshes (5 minutes).
const DEFAULT_REFRESH_SECS: u64 = 300;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("itinerary_server=info")),
        )
        .init();

    // Read configuration from environment
    let snapshot_path =
        std::env::var("ITINERARY_SNAPSHOT").expect("ITINERARY_SNAPSHOT must point to a JSON snapshot");
    let addr: SocketAddr = std::env::var("ITINERARY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("ITINERARY_ADDR must be a socket address");
    let refresh_secs = match std::env::var("ITINERARY_REFRESH_SECS") {
        Ok(v) => v.parse().expect("ITINERARY_REFRESH_SECS must be a number of seconds"),
        Err(_) => DEFAULT_REFRESH_SECS,
    };

    // Load the snapshot and put a cache in front of it
    let store = InMemoryStore::load(&snapshot_path).expect("Failed to load snapshot");
    let store = Arc::new(CachedStore::new(store, &CacheConfig::default()));

    // Build the topology up front (fail fast if the snapshot is inconsistent)
    let topology = match TopologyCache::init(store.as_ref()).await {
        Ok(topology) => topology,
        Err(e) => {
            error!(error = %e, path = %snapshot_path, "failed to build topology");
            std::process::exit(1);
        }
    };
    if let Some(current) = topology.current().await {
        info!(
            locations = current.location_count(),
            legs = current.edge_count(),
            "loaded topology"
        );
    }

    let planner = Planner::with_topology(store, topology, SearchConfig::default());
    let state = AppState::new(planner);

    // Spawn background task to refresh the topology periodically
    if refresh_secs > 0 {
        let refresh_state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match Snapshot::from_file(&snapshot_path) {
                    Ok(snapshot) => refresh_state.planner.store().inner().replace(snapshot).await,
                    Err(e) => {
                        warn!(error = %e, "failed to reload snapshot; keeping previous data");
                        continue;
                    }
                }
                match refresh_state.refresh().await {
                    Ok(topology) => info!(
                        locations = topology.location_count(),
                        legs = topology.edge_count(),
                        "refreshed topology"
                    ),
                    Err(e) => warn!(error = %e, "topology refresh failed; keeping previous snapshot"),
                }
            }
        });
    }

    let app = create_router(state);

    info!(%addr, "itinerary server listening");
    info!("  GET  /health            - Health check");
    info!("  GET  /itineraries       - Search itineraries");
    info!("  POST /topology/refresh  - Rebuild topology");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
