//! Registry of live timers and their cancellation signals.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use ahash::RandomState;
use hashbrown::HashMap;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::TimerId;

#[cfg(test)]
mod tests;

/// Tracks every timer that may still fire.
///
/// Each entry pairs a timer id with the [`Notify`] its parked task races
/// against its sleep, so revoking an entry wakes the task immediately instead
/// of waiting out the delay. A timer that is about to fire removes its own
/// entry first; a missing entry means the firing was revoked.
pub(crate) struct TimerRegistry {
  next:    AtomicU64,
  entries: Mutex<HashMap<TimerId, Arc<Notify>, RandomState>>,
}

impl TimerRegistry {
  pub(crate) fn new() -> Self {
    Self { next: AtomicU64::new(0), entries: Mutex::new(HashMap::with_hasher(RandomState::new())) }
  }

  /// Mints a fresh id and tracks its cancellation signal.
  pub(crate) fn register(&self) -> (TimerId, Arc<Notify>) {
    let id = TimerId::new(self.next.fetch_add(1, Ordering::SeqCst));
    let signal = Arc::new(Notify::new());
    self.entries.lock().insert(id, signal.clone());
    (id, signal)
  }

  /// Claims the right to fire: removes the entry and reports whether it was
  /// still live. A `false` return means the timer was revoked.
  pub(crate) fn take(&self, id: TimerId) -> bool {
    self.entries.lock().remove(&id).is_some()
  }

  /// Returns whether the timer is still live.
  pub(crate) fn contains(&self, id: TimerId) -> bool {
    self.entries.lock().contains_key(&id)
  }

  /// Revokes a single timer, waking its parked task.
  pub(crate) fn cancel(&self, id: TimerId) -> bool {
    let removed = self.entries.lock().remove(&id);
    match removed {
      | Some(signal) => {
        signal.notify_one();
        true
      },
      | None => false,
    }
  }

  /// Revokes every live timer and returns how many were cleared.
  pub(crate) fn clear(&self) -> usize {
    let drained: Vec<_> = self.entries.lock().drain().collect();
    let cleared = drained.len();
    for (_, signal) in drained {
      signal.notify_one();
    }
    cleared
  }

  /// Returns the number of live timers.
  pub(crate) fn live_count(&self) -> usize {
    self.entries.lock().len()
  }
}
