//! Mailbox package.
//!
//! This module contains the envelope queue, its configuration, and the
//! overflow policy types.

mod base;
mod enqueue_result;
mod mailbox_config;
mod overflow_strategy;

pub use base::{Mailbox, NON_BLOCKING_TIMEOUT};
pub use enqueue_result::EnqueueResult;
pub use mailbox_config::MailboxConfig;
pub use overflow_strategy::OverflowStrategy;
