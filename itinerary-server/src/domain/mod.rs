//! Domain types for the itinerary search.
//!
//! This module contains the core domain model: locations, the directed
//! legs between them, trips scheduled on legs, and the itineraries built
//! from trips. Types that carry invariants enforce them at construction
//! time, so code that receives them can trust their validity.

mod error;
mod itinerary;
mod leg;
mod location;
mod trip;
mod window;

pub use error::DomainError;
pub use itinerary::{Itinerary, Segment};
pub use leg::{Leg, LegId};
pub use location::{InvalidLocationCode, Location, LocationCode};
pub use trip::{Trip, TripId};
pub use window::Window;
