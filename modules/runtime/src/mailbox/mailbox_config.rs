//! Mailbox configuration record.

use super::OverflowStrategy;


/// Immutable mailbox configuration.
///
/// Setter-style methods return a new instance instead of mutating in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MailboxConfig {
  bounded:  bool,
  capacity: usize,
  strategy: OverflowStrategy,
}

impl MailboxConfig {
  /// Channel capacity substituted when the mailbox is unbounded. The
  /// underlying channel always has a finite capacity; this sentinel is large
  /// enough that an unbounded mailbox never reports itself full.
  pub const UNBOUNDED_CAPACITY: usize = 65_536;

  /// Creates a bounded configuration with the provided capacity and policy.
  #[must_use]
  pub const fn bounded(capacity: usize, strategy: OverflowStrategy) -> Self {
    Self { bounded: true, capacity, strategy }
  }

  /// Creates an unbounded configuration backed by the sentinel capacity.
  #[must_use]
  pub const fn unbounded() -> Self {
    Self { bounded: false, capacity: Self::UNBOUNDED_CAPACITY, strategy: OverflowStrategy::Backpressure }
  }

  /// Returns whether the mailbox enforces its capacity.
  #[must_use]
  pub const fn is_bounded(&self) -> bool {
    self.bounded
  }

  /// Returns the configured capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the overflow policy.
  #[must_use]
  pub const fn strategy(&self) -> OverflowStrategy {
    self.strategy
  }

  /// Overrides the capacity.
  #[must_use]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Overrides the overflow policy.
  #[must_use]
  pub const fn with_strategy(mut self, strategy: OverflowStrategy) -> Self {
    self.strategy = strategy;
    self
  }
}

impl Default for MailboxConfig {
  fn default() -> Self {
    Self::unbounded()
  }
}
