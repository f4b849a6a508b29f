//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Default maximum number of hops (legs) per itinerary.
    /// 3 hops means up to two intermediate stops.
    pub max_hops: usize,

    /// Default width of the departure window (minutes).
    /// Bounds the whole itinerary, not each hop.
    pub window_span_mins: i64,

    /// Deadline for a single search (seconds).
    pub timeout_secs: u64,

    /// Maximum number of paths resolved and assembled concurrently.
    pub batch_size: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_hops: usize, window_span_mins: i64, timeout_secs: u64, batch_size: usize) -> Self {
        Self {
            max_hops,
            window_span_mins,
            timeout_secs,
            batch_size,
        }
    }

    /// Returns the default window span as a Duration.
    pub fn window_span(&self) -> Duration {
        Duration::minutes(self.window_span_mins)
    }

    /// Returns the search deadline.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: 3,
            window_span_mins: 24 * 60, // 1 day
            timeout_secs: 10,
            batch_size: 8,
        }
    }
}
