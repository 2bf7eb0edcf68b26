//! Quiescence barrier counting live coroutines and timers.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[cfg(test)]
mod tests;

/// Counts every tracked coroutine and timer so the run loop can block until
/// all of them have completed.
///
/// Registration happens before the task is handed to the host scheduler, so
/// the count never reads zero while a registered task is still pending.
pub(crate) struct TaskMonitor {
  active:      AtomicUsize,
  idle_signal: Notify,
}

impl TaskMonitor {
  pub(crate) fn new() -> Self {
    Self { active: AtomicUsize::new(0), idle_signal: Notify::new() }
  }

  /// Tracks one more live task.
  pub(crate) fn register(&self) {
    self.active.fetch_add(1, Ordering::SeqCst);
  }

  /// Marks one tracked task as completed, waking idle waiters when it was
  /// the last one.
  pub(crate) fn complete(&self) {
    if self.active.fetch_sub(1, Ordering::SeqCst) == 1 {
      self.idle_signal.notify_waiters();
    }
  }

  /// Returns the number of live tracked tasks.
  pub(crate) fn active_count(&self) -> usize {
    self.active.load(Ordering::SeqCst)
  }

  /// Waits until no tracked task remains.
  pub(crate) async fn idle(&self) {
    loop {
      let notified = self.idle_signal.notified();
      if self.active.load(Ordering::SeqCst) == 0 {
        return;
      }
      notified.await;
    }
  }
}
