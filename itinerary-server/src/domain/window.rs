//! Departure windows.

use chrono::{DateTime, Duration, Utc};

/// A half-open interval `[start, end)` in which a trip's departure must fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    /// Creates a window from explicit bounds. An `end` before `start` yields
    /// an empty window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates the window `[start, start + span)`, or `None` if the end
    /// is not representable.
    pub fn try_spanning(start: DateTime<Utc>, span: Duration) -> Option<Self> {
        start.checked_add_signed(span).map(|end| Self::new(start, end))
    }

    /// Creates the window `[start, start + span)`. An end past the last
    /// representable instant is clamped to it.
    pub fn spanning(start: DateTime<Utc>, span: Duration) -> Self {
        Self::try_spanning(start, span).unwrap_or_else(|| Self::new(start, DateTime::<Utc>::MAX_UTC))
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if no instant can fall inside this window.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns a window with the same upper bound and a new lower bound.
    ///
    /// Used for connecting hops: the lower bound moves to the previous
    /// arrival while the upper bound stays anchored to the query window.
    pub fn starting_at(&self, lower: DateTime<Utc>) -> Self {
        Self::new(lower, self.end)
    }
}
