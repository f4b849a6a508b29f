//! Scheduled trips on legs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LegId;
use super::location::active_by_default;

/// Identifier of a trip record in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trip#{}", self.0)
    }
}

/// A concrete scheduled departure on a leg.
///
/// `attributes` carries whatever the surrounding system stores alongside
/// a trip (capacity, prices, booked parties). The search core never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    /// The leg this trip is scheduled on
    pub leg: LegId,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub attributes: serde_json::Value,
}

impl Trip {
    /// Creates an active trip with no attributes.
    pub fn new(id: TripId, leg: LegId, departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Self {
        Self {
            id,
            leg,
            departure,
            arrival,
            is_active: true,
            attributes: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn attributes_pass_through_serde() {
        let json = r#"{
            "id": 3,
            "leg": 9,
            "departure": "2024-05-05T03:00:00Z",
            "arrival": "2024-05-05T04:00:00Z",
            "attributes": {"economy_price": 200.0, "economy_reserved": 4}
        }"#;
        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.id, TripId(3));
        assert_eq!(trip.leg, LegId(9));
        assert!(trip.is_active);
        assert_eq!(trip.attributes["economy_reserved"], 4);

        let back = serde_json::to_value(&trip).unwrap();
        assert_eq!(back["attributes"]["economy_price"], 200.0);
    }

    #[test]
    fn null_attributes_are_omitted() {
        let dep = Utc.with_ymd_and_hms(2024, 5, 5, 1, 0, 0).unwrap();
        let trip = Trip::new(TripId(1), LegId(2), dep, dep + Duration::hours(1));
        let value = serde_json::to_value(&trip).unwrap();
        assert!(value.get("attributes").is_none());
    }
}
