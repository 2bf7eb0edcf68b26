//! Runtime package.
//!
//! This module contains the scheduler lifecycle: pending work queues, the
//! cooperative run loop, timers, and shutdown.

mod base;
mod task_monitor;

pub use base::{MIN_TIMER_DELAY, RUNTIME_NAME, Runtime};
pub(crate) use task_monitor::TaskMonitor;
