//! Rate limiting logic and state management.

mod budget;
mod hooks;
mod limiter;

pub use budget::ConsumerBudget;
pub use hooks::{ConsumptionEvent, ConsumptionHook, Hooks, ResetHook};
pub use limiter::Limiter;
