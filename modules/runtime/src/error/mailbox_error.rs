//! Errors returned by mailbox operations.

use std::{error::Error, fmt, time::Duration};

use crate::mailbox::OverflowStrategy;


/// Represents failures that can occur while enqueuing or dequeuing envelopes.
///
/// All variants are reported synchronously at the call that provoked them;
/// the mailbox never retries internally. Policy outcomes such as dropping or
/// backpressuring an envelope are ordinary
/// [`EnqueueResult`](crate::mailbox::EnqueueResult) values, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MailboxError {
  /// The mailbox was closed before the operation started, or became closed
  /// while a blocking dequeue was waiting.
  Closed,
  /// A bounded mailbox was at capacity and its strategy rejects overflow.
  Overflow {
    /// Configured capacity of the mailbox.
    capacity: usize,
    /// Strategy that raised the rejection.
    strategy: OverflowStrategy,
  },
  /// A blocking dequeue exceeded the caller's timeout.
  Timeout {
    /// The timeout the caller requested.
    requested: Duration,
  },
}

impl fmt::Display for MailboxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | MailboxError::Closed => f.write_str("MailboxError::Closed"),
      | MailboxError::Overflow { capacity, strategy } => {
        write!(f, "MailboxError::Overflow(capacity={capacity}, strategy={strategy})")
      },
      | MailboxError::Timeout { requested } => {
        write!(f, "MailboxError::Timeout(requested={}ms)", requested.as_millis())
      },
    }
  }
}

impl Error for MailboxError {}
