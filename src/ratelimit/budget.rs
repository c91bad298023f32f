//! Per-consumer budget tracking.

/// A consumer's accumulated points within the current reset window.
///
/// Budgets are created lazily on a consumer's first successful consumption
/// and are never removed; the periodic reset zeroes them in place, so a
/// consumer that has been seen before remains distinguishable from one that
/// has not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerBudget {
    /// Points consumed so far in this window
    points: u64,
}

impl ConsumerBudget {
    /// Create a budget with the given point count.
    pub fn new(points: u64) -> Self {
        Self { points }
    }

    /// Points consumed so far in the current window.
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Set the accumulated point count.
    pub(crate) fn set_points(&mut self, points: u64) {
        self.points = points;
    }

    /// Zero the budget for a new window.
    pub(crate) fn clear(&mut self) {
        self.points = 0;
    }
}
