//! Directed legs between locations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LocationCode;
use super::location::active_by_default;

/// Identifier of a leg record in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegId(pub u64);

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leg#{}", self.0)
    }
}

/// A serviceable directed connection from one location to another.
///
/// Endpoints are held by code, not by reference, so a leg is a small
/// `Copy` value that can be stored in topology snapshots and itineraries
/// alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leg {
    pub id: LegId,
    pub origin: LocationCode,
    pub destination: LocationCode,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Leg {
    /// Creates an active leg.
    pub fn new(id: LegId, origin: LocationCode, destination: LocationCode) -> Self {
        Self {
            id,
            origin,
            destination,
            is_active: true,
        }
    }

    /// Returns true if this leg connects `origin` to `destination` in that direction.
    pub fn serves(&self, origin: &LocationCode, destination: &LocationCode) -> bool {
        &self.origin == origin && &self.destination == destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    #[test]
    fn serves_is_directional() {
        let leg = Leg::new(LegId(1), code("LAX"), code("DFW"));
        assert!(leg.serves(&code("LAX"), &code("DFW")));
        assert!(!leg.serves(&code("DFW"), &code("LAX")));
    }

    #[test]
    fn deserialize_defaults_active() {
        let leg: Leg =
            serde_json::from_str(r#"{"id":7,"origin":"LAX","destination":"JFK"}"#).unwrap();
        assert_eq!(leg, Leg::new(LegId(7), code("LAX"), code("JFK")));

        let inactive: Leg = serde_json::from_str(
            r#"{"id":8,"origin":"LAX","destination":"JFK","is_active":false}"#,
        )
        .unwrap();
        assert!(!inactive.is_active);
    }

    #[test]
    fn display_id() {
        assert_eq!(LegId(42).to_string(), "leg#42");
    }
}
