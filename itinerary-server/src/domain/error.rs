//! Domain error types.
//!
//! These errors represent validation failures when assembling domain
//! values. They are distinct from storage and search errors.

use super::{LegId, LocationCode, TripId};

/// Domain-level errors for itinerary validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,

    /// A trip was paired with a leg it is not scheduled on
    #[error("{trip} is not scheduled on {leg}")]
    TripNotOnLeg { trip: TripId, leg: LegId },

    /// Consecutive legs don't share a location
    #[error("legs do not connect: {0} then {1}")]
    LegsNotConnected(LocationCode, LocationCode),

    /// A trip departs before the previous one arrives
    #[error("{next} departs before {previous} arrives")]
    DepartsBeforeArrival { previous: TripId, next: TripId },
}
