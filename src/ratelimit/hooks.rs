//! Observer hooks around consumption and reset.
//!
//! Hooks are pure instrumentation: they observe state transitions but
//! cannot veto them. Each slot holds at most one callback; attaching a new
//! one replaces the previous occupant rather than chaining.

use std::collections::HashMap;
use std::fmt;

use super::budget::ConsumerBudget;

/// Payload passed to consumption hooks.
///
/// `before_consumption` receives the budget as it stands prior to the
/// mutation; `after_consumption` receives the post-mutation budget. The
/// requested amount is the same in both.
pub struct ConsumptionEvent<'a> {
    /// Key identifying the consumer
    pub consumer_key: &'a str,
    /// The consumer's budget at the time of the call
    pub budget: ConsumerBudget,
    /// Points requested by the caller
    pub requested_points: u64,
}

/// Callback invoked around a successful consumption.
pub type ConsumptionHook = Box<dyn Fn(&ConsumptionEvent<'_>) + Send + Sync>;

/// Callback invoked around a periodic reset, with a reference to the full
/// consumer mapping.
pub type ResetHook = Box<dyn Fn(&HashMap<String, ConsumerBudget>) + Send + Sync>;

/// The four optional hook slots.
///
/// Used both as the limiter's internal hook storage and as the argument to
/// [`Limiter::attach_hooks`](super::Limiter::attach_hooks), where `Some`
/// fields replace the corresponding slot and `None` fields leave it
/// untouched.
#[derive(Default)]
pub struct Hooks {
    /// Invoked before a successful consumption mutates state
    pub before_consumption: Option<ConsumptionHook>,
    /// Invoked after a successful consumption, with the updated budget
    pub after_consumption: Option<ConsumptionHook>,
    /// Invoked before a periodic reset zeroes the budgets
    pub before_reset: Option<ResetHook>,
    /// Invoked after a periodic reset, with the mapping in its zeroed state
    pub after_reset: Option<ResetHook>,
}

impl Hooks {
    /// Merge `other` into these slots: `Some` replaces, `None` is left
    /// untouched.
    pub(crate) fn merge(&mut self, other: Hooks) {
        if let Some(hook) = other.before_consumption {
            self.before_consumption = Some(hook);
        }
        if let Some(hook) = other.after_consumption {
            self.after_consumption = Some(hook);
        }
        if let Some(hook) = other.before_reset {
            self.before_reset = Some(hook);
        }
        if let Some(hook) = other.after_reset {
            self.after_reset = Some(hook);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_consumption", &self.before_consumption.is_some())
            .field("after_consumption", &self.after_consumption.is_some())
            .field("before_reset", &self.before_reset.is_some())
            .field("after_reset", &self.after_reset.is_some())
            .finish()
    }
}
