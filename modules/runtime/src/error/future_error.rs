//! Errors returned when awaiting a future slot.

use std::{error::Error, fmt, sync::Arc};


/// Failure cause stored in a future slot by its producer.
///
/// The slot does not interpret the cause; it is handed back verbatim to every
/// awaiter. Shared ownership lets multiple awaiters observe the same failure.
pub type FutureFailure = Arc<dyn Error + Send + Sync>;

/// Represents the ways awaiting a future slot can fail.
#[derive(Clone)]
pub enum FutureError {
  /// The slot was cancelled before a value or failure was stored.
  Cancelled,
  /// The producer stored a failure instead of a value.
  Failed(FutureFailure),
}

impl FutureError {
  /// Returns whether the error reports cancellation.
  #[must_use]
  pub const fn is_cancelled(&self) -> bool {
    matches!(self, FutureError::Cancelled)
  }
}

impl fmt::Display for FutureError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | FutureError::Cancelled => f.write_str("FutureError::Cancelled"),
      | FutureError::Failed(cause) => write!(f, "FutureError::Failed({cause})"),
    }
  }
}

impl fmt::Debug for FutureError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | FutureError::Cancelled => f.write_str("Cancelled"),
      | FutureError::Failed(cause) => f.debug_tuple("Failed").field(cause).finish(),
    }
  }
}

impl Error for FutureError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      | FutureError::Cancelled => None,
      | FutureError::Failed(cause) => Some(cause.as_ref()),
    }
  }
}
