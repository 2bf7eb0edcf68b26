//! Non-error outcomes of offering an envelope to a mailbox.

/// Outcome of a successful `enqueue` call.
///
/// Policy decisions that discard or refuse an envelope are not errors; they
/// are reported through this enum so producers can react without unwinding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueResult {
  /// The envelope now resides in the mailbox.
  Accepted,
  /// The envelope was discarded by the `DropNewest` policy.
  Dropped,
  /// The mailbox is at capacity and the `Backpressure` policy asks the
  /// producer to slow down; the envelope was not stored.
  Backpressured,
}

impl EnqueueResult {
  /// Returns whether the envelope was stored in the mailbox.
  #[must_use]
  pub const fn is_accepted(self) -> bool {
    matches!(self, EnqueueResult::Accepted)
  }
}
