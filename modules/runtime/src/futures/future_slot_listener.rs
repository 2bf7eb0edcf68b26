//! Future adapter that awaits a [`FutureSlot`](super::FutureSlot) outcome.

use std::{
  future::Future,
  pin::Pin,
  sync::Arc,
  task::{Context, Poll},
};

use parking_lot::Mutex;

use super::future_slot::FutureSlotState;
use crate::error::FutureError;

/// Future adapter that polls the underlying slot state.
///
/// The listener holds a shared reference to the slot and locks it on each
/// poll: when an outcome is present it is handed out, otherwise the task
/// waker is registered and the poll stays pending. Any number of listeners
/// may await the same slot.
pub struct FutureSlotListener<T> {
  state: Arc<Mutex<FutureSlotState<T>>>,
}

impl<T> FutureSlotListener<T> {
  pub(super) fn new(state: Arc<Mutex<FutureSlotState<T>>>) -> Self {
    Self { state }
  }
}

impl<T> Clone for FutureSlotListener<T> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone() }
  }
}

impl<T> Future for FutureSlotListener<T>
where
  T: Clone + Send + 'static,
{
  type Output = Result<T, FutureError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match self.state.lock().poll_outcome(cx.waker()) {
      | Some(outcome) => Poll::Ready(outcome),
      | None => Poll::Pending,
    }
  }
}

impl<T> Unpin for FutureSlotListener<T> {}
