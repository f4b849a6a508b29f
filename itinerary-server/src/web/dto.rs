//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Segment};
use crate::planner::{SearchResult, Topology};

/// Query string for itinerary search.
#[derive(Debug, Deserialize)]
pub struct ItineraryQuery {
    /// Origin location code
    pub origin: String,

    /// Destination location code
    pub destination: String,

    /// Start of the departure window, RFC 3339
    pub departure: String,

    /// Width of the departure window in minutes
    pub window_mins: Option<i64>,

    /// Maximum number of hops
    pub max_hops: Option<usize>,
}

/// Response for itinerary search.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub itineraries: Vec<ItineraryResult>,
    pub paths_explored: usize,
    pub paths_unresolved: usize,
}

/// An itinerary in search results.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Number of trips taken
    pub hops: usize,

    /// Number of intermediate stops
    pub stops: usize,

    /// Departure of the first trip
    pub departure: String,

    /// Arrival of the last trip
    pub arrival: String,

    /// Door-to-door duration in minutes
    pub duration_mins: i64,

    pub trips: Vec<TripResult>,
}

/// One trip within an itinerary.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub trip_id: u64,
    pub leg_id: u64,

    /// Location codes served by the leg
    pub origin: String,
    pub destination: String,

    pub departure: String,
    pub arrival: String,

    /// Opaque trip attributes from storage
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub attributes: serde_json::Value,
}

/// Response for a topology refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub locations: usize,
    pub legs: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ItineraryResponse {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            itineraries: result
                .itineraries
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
            paths_explored: result.paths_explored,
            paths_unresolved: result.paths_unresolved,
        }
    }
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            hops: itinerary.hop_count(),
            stops: itinerary.stop_count(),
            departure: format_time(&itinerary.departure_time()),
            arrival: format_time(&itinerary.arrival_time()),
            duration_mins: itinerary.total_duration().num_minutes(),
            trips: itinerary
                .segments()
                .iter()
                .map(TripResult::from_segment)
                .collect(),
        }
    }
}

impl TripResult {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            trip_id: segment.trip.id.0,
            leg_id: segment.leg.id.0,
            origin: segment.leg.origin.to_string(),
            destination: segment.leg.destination.to_string(),
            departure: format_time(&segment.trip.departure),
            arrival: format_time(&segment.trip.arrival),
            attributes: segment.trip.attributes.clone(),
        }
    }
}

impl RefreshResponse {
    pub fn from_topology(topology: &Topology) -> Self {
        Self {
            locations: topology.location_count(),
            legs: topology.edge_count(),
        }
    }
}

/// Format a timestamp as RFC 3339 with second precision.
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
