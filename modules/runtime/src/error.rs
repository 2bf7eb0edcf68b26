//! Error package.
//!
//! This module contains the error kinds surfaced by the runtime primitives.

mod future_error;
mod mailbox_error;

pub use future_error::{FutureError, FutureFailure};
pub use mailbox_error::MailboxError;
