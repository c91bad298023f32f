//! Core point-based limiter implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::config::LimiterConfig;
use crate::error::{LimiterError, Result};

use super::budget::ConsumerBudget;
use super::hooks::{ConsumptionEvent, Hooks};

/// State shared between the limiter handle and the periodic reset task.
struct Shared {
    /// Consumer budgets indexed by consumer key
    consumers: Mutex<HashMap<String, ConsumerBudget>>,
    /// Observer hook slots
    hooks: Mutex<Hooks>,
}

impl Shared {
    /// Zero every known consumer's budget, keeping the keys in place.
    ///
    /// Runs entirely under the consumer map lock so that no concurrent
    /// consumption can observe a partially reset mapping.
    fn reset(&self) {
        let mut consumers = self.consumers.lock();
        let hooks = self.hooks.lock();

        if let Some(hook) = &hooks.before_reset {
            hook(&consumers);
        }

        for budget in consumers.values_mut() {
            budget.clear();
        }

        if let Some(hook) = &hooks.after_reset {
            hook(&consumers);
        }

        trace!(consumers = consumers.len(), "Reset all consumer budgets");
    }
}

/// A point-based rate limiter with periodic budget resets.
///
/// Each consumer key accumulates points up to a global maximum; a
/// background task zeroes every budget once per reset interval. The limiter
/// is thread-safe and can be shared across tasks.
///
/// Construction validates the configuration and starts the limiter
/// immediately, so it must happen within a tokio runtime. [`stop`] cancels
/// the reset task and retains budgets; [`start`] resumes the schedule.
///
/// [`start`]: Limiter::start
/// [`stop`]: Limiter::stop
pub struct Limiter {
    /// Global maximum points per consumer per window
    max_points: u64,
    /// Interval between periodic resets
    reset_interval: Duration,
    /// State shared with the reset task
    shared: Arc<Shared>,
    /// Handle to the periodic reset task; present iff the limiter is running
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Limiter {
    /// Create a new limiter from the given configuration and start it.
    ///
    /// Fails with [`LimiterError::Config`] if the configuration does not
    /// validate. A `reset_interval_ms` of 0 is replaced with the default
    /// before validation runs.
    pub fn new(config: LimiterConfig) -> Result<Self> {
        let config = config.validated()?;

        let limiter = Self {
            max_points: config.max_points,
            reset_interval: Duration::from_millis(config.reset_interval_ms),
            shared: Arc::new(Shared {
                consumers: Mutex::new(HashMap::new()),
                hooks: Mutex::new(Hooks::default()),
            }),
            task: Mutex::new(None),
        };

        debug!(
            max_points = limiter.max_points,
            reset_interval_ms = config.reset_interval_ms,
            "Creating limiter"
        );

        limiter.start()?;
        Ok(limiter)
    }

    /// Start the periodic reset task.
    ///
    /// Fails with [`LimiterError::AlreadyRunning`] if the limiter is
    /// already running. The first reset fires one full interval after the
    /// call, never immediately, so budgets retained across a stop/start
    /// cycle keep their values until the next scheduled firing.
    pub fn start(&self) -> Result<()> {
        let mut task = self.task.lock();
        if task.is_some() {
            return Err(LimiterError::AlreadyRunning);
        }

        let shared = Arc::clone(&self.shared);
        let period = self.reset_interval;

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                shared.reset();
            }
        });

        *task = Some(handle);
        debug!("Limiter started");
        Ok(())
    }

    /// Stop the periodic reset task.
    ///
    /// Fails with [`LimiterError::AlreadyStopped`] if the limiter is not
    /// running. When this returns, the task has fully terminated and no
    /// further reset will fire. Consumer budgets are retained.
    pub async fn stop(&self) -> Result<()> {
        let handle = self
            .task
            .lock()
            .take()
            .ok_or(LimiterError::AlreadyStopped)?;

        handle.abort();
        // The reset body holds the map lock and never awaits, so once the
        // aborted task has been joined no firing can be in flight.
        let _ = handle.await;

        debug!("Limiter stopped");
        Ok(())
    }

    /// Whether the periodic reset task is currently active.
    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }

    /// Replace any subset of the hook slots.
    ///
    /// `Some` fields replace the existing hook of that kind; `None` fields
    /// leave it untouched. May be called at any time, including while
    /// running.
    pub fn attach_hooks(&self, hooks: Hooks) {
        self.shared.hooks.lock().merge(hooks);
    }

    /// Consume `points` against `consumer_key`'s budget.
    ///
    /// On success the budget grows by `points` (the entry is created on a
    /// consumer's first consumption) and the post-mutation budget is
    /// returned. A request that would push the budget past `max_points`
    /// fails with [`LimiterError::NotEnoughPoints`] and leaves the stored
    /// total unchanged.
    pub fn consume(&self, consumer_key: &str, points: u64) -> Result<ConsumerBudget> {
        if !self.is_running() {
            return Err(LimiterError::NotRunning);
        }
        if consumer_key.is_empty() {
            return Err(LimiterError::InvalidKey);
        }
        if points < 1 {
            return Err(LimiterError::InvalidAmount);
        }
        if points > self.max_points {
            return Err(LimiterError::ExceedsMax {
                requested_points: points,
                max_points: self.max_points,
            });
        }

        trace!(
            consumer_key = %consumer_key,
            points = points,
            "Consuming points"
        );

        let mut consumers = self.shared.consumers.lock();
        let hooks = self.shared.hooks.lock();

        let current = consumers.get(consumer_key).copied().unwrap_or_default();

        let new_total = match current.points().checked_add(points) {
            Some(total) if total <= self.max_points => total,
            _ => {
                debug!(
                    consumer_key = %consumer_key,
                    current_points = current.points(),
                    requested_points = points,
                    "Consumption rejected"
                );
                return Err(LimiterError::NotEnoughPoints {
                    current_points: current.points(),
                    requested_points: points,
                    max_points: self.max_points,
                });
            }
        };

        if let Some(hook) = &hooks.before_consumption {
            hook(&ConsumptionEvent {
                consumer_key,
                budget: current,
                requested_points: points,
            });
        }

        let budget = consumers.entry(consumer_key.to_string()).or_insert_with(|| {
            debug!(consumer_key = %consumer_key, "Creating new consumer budget");
            ConsumerBudget::default()
        });
        budget.set_points(new_total);
        let updated = *budget;

        if let Some(hook) = &hooks.after_consumption {
            hook(&ConsumptionEvent {
                consumer_key,
                budget: updated,
                requested_points: points,
            });
        }

        Ok(updated)
    }

    /// Get the current point balance for a consumer key.
    ///
    /// Returns `None` if the consumer has never been seen, as opposed to
    /// `Some(0)` for one whose budget has been reset.
    pub fn balance(&self, consumer_key: &str) -> Option<u64> {
        let consumers = self.shared.consumers.lock();
        consumers.get(consumer_key).map(|b| b.points())
    }

    /// Get the number of known consumers.
    pub fn consumer_count(&self) -> usize {
        self.shared.consumers.lock().len()
    }
}

impl Drop for Limiter {
    fn drop(&mut self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}
