//! Itinerary search server.
//!
//! Answers: "which chains of scheduled trips take me from this location
//! to that one, leaving within this window?"

pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
