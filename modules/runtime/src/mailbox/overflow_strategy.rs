//! Overflow policies for bounded mailboxes.

use std::fmt;

/// Decides what happens when an envelope is offered to a bounded mailbox that
/// is already at capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverflowStrategy {
  /// Discard the offered envelope and report it as dropped.
  DropNewest,
  /// Discard the oldest resident envelope and accept the offered one.
  DropOldest,
  /// Leave the mailbox untouched and report backpressure to the producer.
  Backpressure,
  /// Reject the offer with a [`MailboxError::Overflow`](crate::error::MailboxError::Overflow).
  ThrowOnOverflow,
}

impl fmt::Display for OverflowStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | OverflowStrategy::DropNewest => f.write_str("DropNewest"),
      | OverflowStrategy::DropOldest => f.write_str("DropOldest"),
      | OverflowStrategy::Backpressure => f.write_str("Backpressure"),
      | OverflowStrategy::ThrowOnOverflow => f.write_str("ThrowOnOverflow"),
    }
  }
}
