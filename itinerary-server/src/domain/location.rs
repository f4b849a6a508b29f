//! Location code and location types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Why a string was rejected as a location code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLocationCode {
    #[error("location code must have 3 letters, got {0}")]
    Length(usize),

    #[error("location code may only contain letters A-Z")]
    Alphabet,
}

/// Three-letter code identifying a location, such as `LAX`.
///
/// Only `A`..=`Z` is stored, so a `LocationCode` is always printable and
/// compares by its letters.
///
/// ```
/// use itinerary_server::domain::LocationCode;
///
/// let lax = LocationCode::parse("LAX").unwrap();
/// assert_eq!(lax.to_string(), "LAX");
/// assert!(LocationCode::parse("lax").is_err());
/// assert_eq!(LocationCode::parse_normalized(" lax ").unwrap(), lax);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationCode([u8; 3]);

impl LocationCode {
    /// Strict parse: exactly three uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationCode> {
        let letters: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidLocationCode::Length(s.chars().count()))?;

        if letters.iter().all(u8::is_ascii_uppercase) {
            Ok(Self(letters))
        } else {
            Err(InvalidLocationCode::Alphabet)
        }
    }

    /// Lenient parse for query input. Trims, then uppercases.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLocationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocationCode").field(&self.as_str()).finish()
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for LocationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LocationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LocationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A place served by legs: a vertex of the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique code; the identity of the location.
    pub code: LocationCode,
    /// Display name
    pub name: String,
    /// Inactive locations are excluded from the topology.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Location {
    /// Creates an active location.
    pub fn new(code: LocationCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            is_active: true,
        }
    }
}

pub(crate) fn active_by_default() -> bool {
    true
}
