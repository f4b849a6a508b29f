//! Itinerary planner.
//!
//! Answers "which trips take me from A to B, leaving within this window?"
//! in four stages:
//!
//! 1. build a topology of locations and legs from storage (`topology`)
//! 2. enumerate every simple path of at most `max_hops` legs (`paths`)
//! 3. resolve each path's hops back to stored legs (`resolve`)
//! 4. chain trips along each path that connect in time (`assemble`)
//!
//! `search` runs these per path concurrently and merges the results.

mod assemble;
mod config;
mod paths;
mod rank;
mod resolve;
mod search;
mod snapshot;
mod topology;


pub use assemble::assemble;
pub use config::SearchConfig;
pub use paths::{Path, enumerate_paths};
pub use rank::rank_itineraries;
pub use resolve::{ResolveError, resolve_path};
pub use search::{Planner, SearchError, SearchRequest, SearchResult};
pub use snapshot::{TopologyCache, TopologyError, load_topology};
pub use topology::{GraphBuildError, Topology};
