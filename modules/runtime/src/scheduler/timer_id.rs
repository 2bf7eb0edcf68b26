//! Identity assigned to a scheduled timer.

use std::fmt;

/// Identifier of a timer tracked by the runtime.
///
/// Ids are minted monotonically per runtime instance and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
  pub(crate) const fn new(value: u64) -> Self {
    Self(value)
  }
}

impl fmt::Display for TimerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "timer-{}", self.0)
  }
}
