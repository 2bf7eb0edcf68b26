//! Handle for revoking a scheduled action.

use std::{
  fmt,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use super::{TimerId, TimerRegistry};


enum CancellableInner {
  /// Wraps a live timer id; cancelling revokes the registry entry.
  Timer {
    registry:  Arc<TimerRegistry>,
    id:        TimerId,
    cancelled: Arc<AtomicBool>,
  },
  /// Revokes a timer that has not been materialised yet. The flag is shared
  /// with the queued thunk that would create the timer at scheduler start.
  Deferred { cancelled: Arc<AtomicBool> },
}

/// Uniform handle for revoking a scheduled action.
///
/// `cancel` is idempotent and `is_cancelled` is monotonic. For timer-backed
/// handles a raised flag means clearance was requested before firing, not
/// that the timer never fired: a callback already mid-fire cannot be revoked.
pub struct Cancellable {
  inner: CancellableInner,
}

impl Cancellable {
  pub(crate) fn timer_backed(registry: Arc<TimerRegistry>, id: TimerId) -> Self {
    Self { inner: CancellableInner::Timer { registry, id, cancelled: Arc::new(AtomicBool::new(false)) } }
  }

  pub(crate) const fn deferred(cancelled: Arc<AtomicBool>) -> Self {
    Self { inner: CancellableInner::Deferred { cancelled } }
  }

  /// Requests clearance of the underlying action. Subsequent calls are
  /// no-ops.
  pub fn cancel(&self) {
    match &self.inner {
      | CancellableInner::Timer { registry, id, cancelled } => {
        if !cancelled.swap(true, Ordering::SeqCst) {
          registry.cancel(*id);
        }
      },
      | CancellableInner::Deferred { cancelled } => {
        cancelled.store(true, Ordering::SeqCst);
      },
    }
  }

  /// Returns whether clearance has been requested.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    match &self.inner {
      | CancellableInner::Timer { cancelled, .. } | CancellableInner::Deferred { cancelled } => {
        cancelled.load(Ordering::SeqCst)
      },
    }
  }
}

impl Clone for Cancellable {
  fn clone(&self) -> Self {
    let inner = match &self.inner {
      | CancellableInner::Timer { registry, id, cancelled } => {
        CancellableInner::Timer { registry: registry.clone(), id: *id, cancelled: cancelled.clone() }
      },
      | CancellableInner::Deferred { cancelled } => CancellableInner::Deferred { cancelled: cancelled.clone() },
    };
    Self { inner }
  }
}

impl fmt::Debug for Cancellable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.inner {
      | CancellableInner::Timer { id, cancelled, .. } => f
        .debug_struct("Cancellable")
        .field("timer", id)
        .field("cancelled", &cancelled.load(Ordering::SeqCst))
        .finish(),
      | CancellableInner::Deferred { cancelled } => f
        .debug_struct("Cancellable")
        .field("deferred", &true)
        .field("cancelled", &cancelled.load(Ordering::SeqCst))
        .finish(),
    }
  }
}
