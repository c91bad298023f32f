//! Pointgate - In-Process Point-Based Rate Limiter
//!
//! This crate implements a point-based rate limiter for single-process use.
//! Callers consume points against a per-consumer budget under a global
//! maximum; a periodic background task zeroes every budget on a fixed
//! interval (a hard reset, not a decaying window). The limiter exposes an
//! explicit start/stop lifecycle and optional observer hooks around
//! consumption and reset.

pub mod config;
pub mod error;
pub mod ratelimit;

pub use config::LimiterConfig;
pub use error::{LimiterError, Result};
pub use ratelimit::{ConsumerBudget, ConsumptionEvent, Hooks, Limiter};
