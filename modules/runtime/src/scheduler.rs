//! Scheduler package.
//!
//! This module contains timer identities, the live-timer registry, and the
//! cancellation handles returned from every timer registration.

mod cancellable;
mod timer_id;
mod timer_registry;

pub use cancellable::Cancellable;
pub use timer_id::TimerId;
pub(crate) use timer_registry::TimerRegistry;
