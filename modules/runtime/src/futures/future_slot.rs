//! Single-assignment value cell shared between one producer and its awaiters.

use std::{sync::Arc, task::Waker};

use parking_lot::Mutex;

use super::FutureSlotListener;
use crate::error::{FutureError, FutureFailure};


pub(super) enum Outcome<T> {
  Value(T),
  Failure(FutureFailure),
  Cancelled,
}

pub(super) struct FutureSlotState<T> {
  outcome:          Option<Outcome<T>>,
  wakers:           Vec<Waker>,
  cancel_callbacks: Vec<Box<dyn FnOnce() + Send>>,
}

impl<T> FutureSlotState<T> {
  pub(super) fn poll_outcome(&mut self, waker: &Waker) -> Option<Result<T, FutureError>>
  where
    T: Clone, {
    match &self.outcome {
      | Some(Outcome::Value(value)) => Some(Ok(value.clone())),
      | Some(Outcome::Failure(failure)) => Some(Err(FutureError::Failed(failure.clone()))),
      | Some(Outcome::Cancelled) => Some(Err(FutureError::Cancelled)),
      | None => {
        if !self.wakers.iter().any(|registered| registered.will_wake(waker)) {
          self.wakers.push(waker.clone());
        }
        None
      },
    }
  }
}

/// Rendezvous between one producer and any number of awaiters for a single
/// outcome.
///
/// The first of `resolve`, `fail`, and `cancel` determines the outcome; later
/// calls are no-ops. Awaiters obtained through [`FutureSlot::listen`] suspend
/// until the outcome is stored and then all observe it. There is no built-in
/// timeout: callers arrange one externally by scheduling a timer that calls
/// [`FutureSlot::fail`].
pub struct FutureSlot<T> {
  inner: Arc<Mutex<FutureSlotState<T>>>,
}

impl<T> FutureSlot<T>
where
  T: Clone + Send + 'static,
{
  /// Creates an unresolved slot.
  #[must_use]
  pub fn new() -> Self {
    let state = FutureSlotState { outcome: None, wakers: Vec::new(), cancel_callbacks: Vec::new() };
    Self { inner: Arc::new(Mutex::new(state)) }
  }

  /// Stores the value and wakes every awaiter. No-op when already resolved.
  pub fn resolve(&self, value: T) {
    self.complete(Outcome::Value(value));
  }

  /// Stores the failure and wakes every awaiter. No-op when already resolved.
  pub fn fail(&self, failure: FutureFailure) {
    self.complete(Outcome::Failure(failure));
  }

  /// Cancels the slot, invoking the registered cancel callbacks in
  /// registration order on the caller's task, then wakes every awaiter.
  /// No-op when already resolved.
  pub fn cancel(&self) {
    let (callbacks, wakers) = {
      let mut state = self.inner.lock();
      if state.outcome.is_some() {
        return;
      }
      state.outcome = Some(Outcome::Cancelled);
      (std::mem::take(&mut state.cancel_callbacks), std::mem::take(&mut state.wakers))
    };
    for callback in callbacks {
      callback();
    }
    for waker in wakers {
      waker.wake();
    }
  }

  /// Registers a callback to run when the slot is cancelled.
  ///
  /// On an already-cancelled slot the callback runs immediately on the
  /// caller's task; a slot resolved with a value or failure drops it.
  pub fn on_cancel(&self, callback: impl FnOnce() + Send + 'static) {
    let run_now = {
      let mut guard = self.inner.lock();
      let state = &mut *guard;
      match &state.outcome {
        | None => {
          state.cancel_callbacks.push(Box::new(callback));
          return;
        },
        | Some(Outcome::Cancelled) => true,
        | Some(_) => false,
      }
    };
    if run_now {
      callback();
    }
  }

  /// Returns whether an outcome has been stored.
  #[must_use]
  pub fn is_resolved(&self) -> bool {
    self.inner.lock().outcome.is_some()
  }

  /// Returns a future that resolves once an outcome is stored.
  #[must_use]
  pub fn listen(&self) -> FutureSlotListener<T> {
    FutureSlotListener::new(self.inner.clone())
  }

  fn complete(&self, outcome: Outcome<T>) {
    let wakers = {
      let mut state = self.inner.lock();
      if state.outcome.is_some() {
        return;
      }
      state.outcome = Some(outcome);
      state.cancel_callbacks.clear();
      std::mem::take(&mut state.wakers)
    };
    for waker in wakers {
      waker.wake();
    }
  }
}

impl<T> Clone for FutureSlot<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> Default for FutureSlot<T>
where
  T: Clone + Send + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
