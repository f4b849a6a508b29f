//! Mapping discovered paths back to concrete leg records.

use crate::domain::{Leg, LocationCode};
use crate::store::{Storage, StoreError};

use super::paths::Path;

/// Error from resolving a path's hops to legs.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Storage has no active leg for a hop that the topology contained.
    /// Topology and storage diverged since the snapshot was taken.
    #[error("no active leg from {origin} to {destination}")]
    RouteNotResolved {
        origin: LocationCode,
        destination: LocationCode,
    },

    /// Storage failed while looking up a leg
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve each hop of `path` to the active leg serving it, in order.
///
/// The whole path is rejected if any hop has no leg.
pub async fn resolve_path<S: Storage>(store: &S, path: &Path) -> Result<Vec<Leg>, ResolveError> {
    let mut legs = Vec::with_capacity(path.hops());

    for (origin, destination) in path.pairs() {
        let leg = store
            .find_leg(&origin, &destination)
            .await?
            .ok_or(ResolveError::RouteNotResolved {
                origin,
                destination,
            })?;
        legs.push(leg);
    }

    Ok(legs)
}
