//! Result ordering for search responses.

use crate::domain::Itinerary;

/// Sort itineraries for presentation.
///
/// Itineraries are ordered by:
/// 1. Number of hops (fewer first)
/// 2. Departure of the first trip (earlier first)
///
/// The sort is stable, so ties keep the order in which paths were
/// enumerated and trips were returned by storage.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| {
        a.hop_count()
            .cmp(&b.hop_count())
            .then_with(|| a.departure_time().cmp(&b.departure_time()))
    });
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, LegId, LocationCode, Segment, Trip, TripId};
    use chrono::{DateTime, TimeZone, Utc};

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 5, h, 0, 0).unwrap()
    }

    /// Build an itinerary along AAA -> BBB -> CCC ... with one-hour trips.
    fn itinerary(first_trip_id: u64, hops: usize, first_departure: u32) -> Itinerary {
        let codes = ["AAA", "BBB", "CCC", "DDD"];
        let segments = (0..hops)
            .map(|i| {
                let leg = Leg::new(LegId(i as u64), code(codes[i]), code(codes[i + 1]));
                let dep = at(first_departure + i as u32);
                let trip = Trip::new(
                    TripId(first_trip_id + i as u64),
                    leg.id,
                    dep,
                    dep + chrono::Duration::hours(1),
                );
                Segment::new(leg, trip).unwrap()
            })
            .collect();
        Itinerary::new(segments).unwrap()
    }

    fn first_ids(itineraries: &[Itinerary]) -> Vec<u64> {
        itineraries
            .iter()
            .map(|i| i.segments()[0].trip.id.0)
            .collect()
    }

    #[test]
    fn fewer_hops_first() {
        let ranked = rank_itineraries(vec![
            itinerary(10, 2, 1),
            itinerary(20, 1, 9),
            itinerary(30, 3, 0),
        ]);
        assert_eq!(first_ids(&ranked), vec![20, 10, 30]);
    }

    #[test]
    fn earlier_departure_breaks_ties() {
        let ranked = rank_itineraries(vec![
            itinerary(10, 2, 5),
            itinerary(20, 2, 1),
            itinerary(30, 2, 3),
        ]);
        assert_eq!(first_ids(&ranked), vec![20, 30, 10]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let ranked = rank_itineraries(vec![itinerary(10, 1, 2), itinerary(20, 1, 2)]);
        assert_eq!(first_ids(&ranked), vec![10, 20]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_itineraries(vec![]).is_empty());
    }
}
