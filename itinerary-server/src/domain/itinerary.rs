//! Itinerary types.
//!
//! An `Itinerary` is a complete, time-consistent chain of trips from an
//! origin to a destination, one trip per hop.

use chrono::{DateTime, Duration, Utc};

use super::{DomainError, Leg, LocationCode, Trip};

/// One hop of an itinerary: a leg and the trip taken on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub leg: Leg,
    pub trip: Trip,
}

impl Segment {
    /// Pairs a trip with the leg it runs on.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the trip is not scheduled on this leg.
    pub fn new(leg: Leg, trip: Trip) -> Result<Self, DomainError> {
        if trip.leg != leg.id {
            return Err(DomainError::TripNotOnLeg {
                trip: trip.id,
                leg: leg.id,
            });
        }
        Ok(Self { leg, trip })
    }

    pub fn origin(&self) -> &LocationCode {
        &self.leg.origin
    }

    pub fn destination(&self) -> &LocationCode {
        &self.leg.destination
    }
}

/// A complete itinerary from origin to destination.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (destination of one = origin of next)
/// - Each trip departs no earlier than the previous trip arrives
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    segments: Vec<Segment>,
}

impl Itinerary {
    /// Constructs an itinerary from segments, validating its invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use itinerary_server::domain::{Itinerary, Leg, LegId, LocationCode, Segment, Trip, TripId};
    ///
    /// let lax = LocationCode::parse("LAX").unwrap();
    /// let jfk = LocationCode::parse("JFK").unwrap();
    /// let leg = Leg::new(LegId(1), lax, jfk);
    ///
    /// let dep = Utc.with_ymd_and_hms(2024, 5, 5, 3, 0, 0).unwrap();
    /// let trip = Trip::new(TripId(1), LegId(1), dep, dep + Duration::hours(5));
    ///
    /// let itinerary = Itinerary::new(vec![Segment::new(leg, trip).unwrap()]).unwrap();
    /// assert_eq!(itinerary.hop_count(), 1);
    /// assert_eq!(itinerary.total_duration(), Duration::hours(5));
    /// ```
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for pair in segments.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.destination() != next.origin() {
                return Err(DomainError::LegsNotConnected(
                    *prev.destination(),
                    *next.origin(),
                ));
            }
            if next.trip.departure < prev.trip.arrival {
                return Err(DomainError::DepartsBeforeArrival {
                    previous: prev.trip.id,
                    next: next.trip.id,
                });
            }
        }

        Ok(Itinerary { segments })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the trips in travel order.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.segments.iter().map(|s| &s.trip)
    }

    /// Number of hops (one trip per hop).
    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of intermediate stops.
    pub fn stop_count(&self) -> usize {
        self.hop_count() - 1
    }

    fn first(&self) -> &Segment {
        // validated non-empty at construction
        &self.segments[0]
    }

    fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn origin(&self) -> &LocationCode {
        self.first().origin()
    }

    pub fn destination(&self) -> &LocationCode {
        self.last().destination()
    }

    /// Departure of the first trip.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.first().trip.departure
    }

    /// Arrival of the last trip.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.last().trip.arrival
    }

    /// Time from first departure to final arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegId, TripId};
    use chrono::TimeZone;

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 5, h, 0, 0).unwrap()
    }

    fn segment(leg_id: u64, from: &str, to: &str, trip_id: u64, dep: u32, arr: u32) -> Segment {
        let leg = Leg::new(LegId(leg_id), code(from), code(to));
        let trip = Trip::new(TripId(trip_id), LegId(leg_id), at(dep), at(arr));
        Segment::new(leg, trip).unwrap()
    }

    #[test]
    fn two_hop_itinerary() {
        let itinerary = Itinerary::new(vec![
            segment(1, "LAX", "DFW", 1, 1, 2),
            segment(2, "DFW", "JFK", 2, 2, 3),
        ])
        .unwrap();

        assert_eq!(itinerary.hop_count(), 2);
        assert_eq!(itinerary.stop_count(), 1);
        assert_eq!(itinerary.origin(), &code("LAX"));
        assert_eq!(itinerary.destination(), &code("JFK"));
        assert_eq!(itinerary.departure_time(), at(1));
        assert_eq!(itinerary.arrival_time(), at(3));
        assert_eq!(itinerary.total_duration(), Duration::hours(2));
        let ids: Vec<_> = itinerary.trips().map(|t| t.id).collect();
        assert_eq!(ids, vec![TripId(1), TripId(2)]);
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(Itinerary::new(vec![]), Err(DomainError::EmptyItinerary));
    }

    #[test]
    fn disconnected_legs_rejected() {
        let result = Itinerary::new(vec![
            segment(1, "LAX", "DFW", 1, 1, 2),
            segment(2, "ORD", "JFK", 2, 3, 4),
        ]);
        assert_eq!(
            result,
            Err(DomainError::LegsNotConnected(code("DFW"), code("ORD")))
        );
    }

    #[test]
    fn departure_before_arrival_rejected() {
        let result = Itinerary::new(vec![
            segment(1, "LAX", "DFW", 1, 1, 3),
            segment(2, "DFW", "JFK", 2, 2, 4),
        ]);
        assert_eq!(
            result,
            Err(DomainError::DepartsBeforeArrival {
                previous: TripId(1),
                next: TripId(2),
            })
        );
    }

    #[test]
    fn zero_minute_connection_allowed() {
        let result = Itinerary::new(vec![
            segment(1, "LAX", "DFW", 1, 1, 2),
            segment(2, "DFW", "JFK", 2, 2, 3),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn trip_on_wrong_leg_rejected() {
        let leg = Leg::new(LegId(1), code("LAX"), code("DFW"));
        let trip = Trip::new(TripId(5), LegId(2), at(1), at(2));
        assert_eq!(
            Segment::new(leg, trip),
            Err(DomainError::TripNotOnLeg {
                trip: TripId(5),
                leg: LegId(1),
            })
        );
    }
}
