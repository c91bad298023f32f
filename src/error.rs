//! Error types for the Pointgate limiter.

use thiserror::Error;

/// Main error type for Pointgate operations.
///
/// `NotEnoughPoints` is the one routine outcome of normal operation; callers
/// are expected to match on it (e.g. to schedule a retry after the next
/// reset). Every other variant signals a precondition violation at the call
/// site and is not retried internally.
#[derive(Error, Debug)]
pub enum LimiterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The limiter is already running
    #[error("Limiter is already running")]
    AlreadyRunning,

    /// The limiter is already stopped
    #[error("Limiter is already stopped")]
    AlreadyStopped,

    /// The limiter must be running to consume points
    #[error("Limiter is not running")]
    NotRunning,

    /// The consumer key was empty
    #[error("Consumer key must not be empty")]
    InvalidKey,

    /// The requested point amount was below the minimum of 1
    #[error("Requested points must be at least 1")]
    InvalidAmount,

    /// A single request can never exceed the global maximum
    #[error("Requested points ({requested_points}) exceed the maximum of {max_points}")]
    ExceedsMax {
        /// Points requested by the caller
        requested_points: u64,
        /// Global maximum points per reset window
        max_points: u64,
    },

    /// The consumer's budget cannot absorb the requested points this window
    #[error(
        "Not enough points: {current_points} consumed, {requested_points} requested, \
         {max_points} allowed per window"
    )]
    NotEnoughPoints {
        /// Points already consumed in the current window
        current_points: u64,
        /// Points requested by the caller
        requested_points: u64,
        /// Global maximum points per reset window
        max_points: u64,
    },
}

/// Result type alias for Pointgate operations.
pub type Result<T> = std::result::Result<T, LimiterError>;
