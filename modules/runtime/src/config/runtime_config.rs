//! Runtime configuration record.


/// Immutable runtime configuration.
///
/// Setter-style methods return a new instance instead of mutating in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
  default_mailbox_capacity: usize,
  enable_coroutine_hook:    bool,
  max_coroutines:           usize,
}

impl RuntimeConfig {
  /// Capacity substituted for bounded mailbox configurations that carry a
  /// zero capacity.
  pub const DEFAULT_MAILBOX_CAPACITY: usize = 1_000;
  /// Advisory ceiling on concurrently live coroutines.
  pub const DEFAULT_MAX_COROUTINES: usize = 100_000;

  /// Creates the default configuration.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      default_mailbox_capacity: Self::DEFAULT_MAILBOX_CAPACITY,
      enable_coroutine_hook:    true,
      max_coroutines:           Self::DEFAULT_MAX_COROUTINES,
    }
  }

  /// Returns the capacity used for bounded mailboxes created without one.
  #[must_use]
  pub const fn default_mailbox_capacity(&self) -> usize {
    self.default_mailbox_capacity
  }

  /// Returns whether the host scheduler intercepts blocking I/O.
  #[must_use]
  pub const fn enable_coroutine_hook(&self) -> bool {
    self.enable_coroutine_hook
  }

  /// Returns the advisory coroutine ceiling. Enforcement is host-dependent;
  /// this runtime only warns when the ceiling is crossed.
  #[must_use]
  pub const fn max_coroutines(&self) -> usize {
    self.max_coroutines
  }

  /// Overrides the default mailbox capacity.
  #[must_use]
  pub const fn with_default_mailbox_capacity(mut self, capacity: usize) -> Self {
    self.default_mailbox_capacity = capacity;
    self
  }

  /// Overrides blocking-I/O interception.
  #[must_use]
  pub const fn with_enable_coroutine_hook(mut self, enabled: bool) -> Self {
    self.enable_coroutine_hook = enabled;
    self
  }

  /// Overrides the advisory coroutine ceiling.
  #[must_use]
  pub const fn with_max_coroutines(mut self, max_coroutines: usize) -> Self {
    self.max_coroutines = max_coroutines;
    self
  }
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self::new()
  }
}
