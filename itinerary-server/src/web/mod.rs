//! Web layer for the itinerary planner.
//!
//! Provides HTTP endpoints for itinerary search and topology refresh.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppPlanner, AppState};
