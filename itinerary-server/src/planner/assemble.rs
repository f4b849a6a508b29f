//! Assembly of time-consistent itineraries for a resolved path.
//!
//! A fold over hops: the accumulator is the set of partial trip chains
//! covering the hops so far. Each hop replaces every chain with its
//! extensions by one feasible trip; a chain with no extension is simply
//! not carried forward. After the last hop every surviving chain is a
//! complete itinerary.

use tracing::trace;

use crate::domain::{Itinerary, Leg, Segment, Trip, Window};
use crate::store::{Storage, StoreError};

/// Find every itinerary that realizes `legs` within `window`.
///
/// The first trip must depart in `window`. Each following trip must depart
/// no earlier than the previous trip arrives and before `window.end()`:
/// the upper bound stays anchored to the query, so the whole itinerary
/// departs its final hop within the original window.
pub async fn assemble<S: Storage>(
    store: &S,
    legs: &[Leg],
    window: Window,
) -> Result<Vec<Itinerary>, StoreError> {
    let Some((first, rest)) = legs.split_first() else {
        return Ok(Vec::new());
    };

    let mut chains: Vec<Vec<Segment>> = feasible_trips(store, first, window)
        .await?
        .into_iter()
        .filter_map(|trip| Segment::new(*first, trip).ok())
        .map(|segment| vec![segment])
        .collect();

    trace!(leg = %first.id, candidates = chains.len(), "first hop");

    for leg in rest {
        if chains.is_empty() {
            break;
        }

        let mut extended = Vec::new();
        for chain in chains {
            let Some(last) = chain.last() else {
                continue;
            };
            let connecting = window.starting_at(last.trip.arrival);
            if connecting.is_empty() {
                continue;
            }

            for trip in feasible_trips(store, leg, connecting).await? {
                let Ok(segment) = Segment::new(*leg, trip) else {
                    continue;
                };
                let mut next = chain.clone();
                next.push(segment);
                extended.push(next);
            }
        }

        trace!(leg = %leg.id, candidates = extended.len(), "connecting hop");
        chains = extended;
    }

    Ok(chains
        .into_iter()
        .filter_map(|segments| Itinerary::new(segments).ok())
        .collect())
}

/// Query trips on `leg` in `window`, keeping only those that really are
/// active, on this leg, and inside the window.
async fn feasible_trips<S: Storage>(
    store: &S,
    leg: &Leg,
    window: Window,
) -> Result<Vec<Trip>, StoreError> {
    let trips = store.find_trips(leg, window).await?;
    Ok(trips
        .into_iter()
        .filter(|t| t.is_active && t.leg == leg.id && window.contains(t.departure))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegId, LocationCode, TripId};
    use crate::store::{InMemoryStore, Snapshot};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 5, h, m, 0).unwrap()
    }

    fn day() -> Window {
        Window::spanning(at(0, 0), Duration::days(1))
    }

    fn lax_dfw() -> Leg {
        Leg::new(LegId(1), code("LAX"), code("DFW"))
    }

    fn dfw_jfk() -> Leg {
        Leg::new(LegId(2), code("DFW"), code("JFK"))
    }

    fn trip(id: u64, leg: u64, dep: DateTime<Utc>, arr: DateTime<Utc>) -> Trip {
        Trip::new(TripId(id), LegId(leg), dep, arr)
    }

    fn store(trips: Vec<Trip>) -> InMemoryStore {
        InMemoryStore::new(Snapshot {
            locations: vec![],
            legs: vec![lax_dfw(), dfw_jfk()],
            trips,
        })
    }

    fn trip_ids(itineraries: &[Itinerary]) -> Vec<Vec<u64>> {
        itineraries
            .iter()
            .map(|i| i.trips().map(|t| t.id.0).collect())
            .collect()
    }

    #[tokio::test]
    async fn single_hop_takes_every_trip_in_window() {
        let store = store(vec![
            trip(1, 1, at(1, 0), at(2, 0)),
            trip(2, 1, at(5, 0), at(6, 0)),
            // Departs on the next day: outside the window
            trip(3, 1, at(0, 0) + Duration::days(1), at(1, 0) + Duration::days(1)),
        ]);

        let result = assemble(&store, &[lax_dfw()], day()).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1], vec![2]]);
    }

    #[tokio::test]
    async fn connection_must_not_depart_before_arrival() {
        let store = store(vec![
            trip(1, 1, at(1, 0), at(2, 0)),
            trip(10, 2, at(1, 30), at(3, 0)), // departs before trip 1 arrives
            trip(11, 2, at(2, 0), at(3, 0)),  // departs exactly on arrival
            trip(12, 2, at(4, 0), at(5, 0)),
        ]);

        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], day()).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1, 11], vec![1, 12]]);
    }

    #[tokio::test]
    async fn two_feasible_first_trips_share_connection() {
        let store = store(vec![
            trip(1, 1, at(1, 0), at(2, 0)),
            trip(2, 1, at(1, 30), at(2, 30)),
            trip(10, 2, at(3, 0), at(4, 0)),
        ]);

        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], day()).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1, 10], vec![2, 10]]);
    }

    #[tokio::test]
    async fn prefix_without_continuation_is_dropped() {
        let store = store(vec![
            trip(1, 1, at(1, 0), at(2, 0)),
            trip(2, 1, at(6, 0), at(7, 0)), // arrives after the only connection leaves
            trip(10, 2, at(3, 0), at(4, 0)),
        ]);

        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], day()).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1, 10]]);
    }

    #[tokio::test]
    async fn upper_bound_stays_anchored_to_query_window() {
        let window = Window::spanning(at(0, 0), Duration::hours(6));
        let store = store(vec![
            trip(1, 1, at(1, 0), at(2, 0)),
            trip(10, 2, at(5, 59), at(8, 0)), // last departure inside the window
            trip(11, 2, at(6, 0), at(8, 0)),  // exactly on the exclusive bound
        ]);

        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], window).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1, 10]]);
    }

    #[tokio::test]
    async fn arrival_past_window_prunes_chain() {
        let window = Window::spanning(at(0, 0), Duration::hours(3));
        let store = store(vec![
            trip(1, 1, at(1, 0), at(4, 0)),
            trip(10, 2, at(4, 0), at(5, 0)),
        ]);

        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], window).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn no_first_hop_trips_is_empty() {
        let store = store(vec![trip(10, 2, at(3, 0), at(4, 0))]);
        let result = assemble(&store, &[lax_dfw(), dfw_jfk()], day()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn no_legs_is_empty() {
        let store = store(vec![]);
        assert!(assemble(&store, &[], day()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ignores_inactive_trips() {
        let mut cancelled = trip(2, 1, at(2, 0), at(3, 0));
        cancelled.is_active = false;
        let store = store(vec![trip(1, 1, at(1, 0), at(2, 0)), cancelled]);

        let result = assemble(&store, &[lax_dfw()], day()).await.unwrap();
        assert_eq!(trip_ids(&result), vec![vec![1]]);
    }
}
