//! Cooperative envelope queue with overflow policy and post-close drain.

use std::{collections::VecDeque, time::Duration};

use parking_lot::Mutex;
use tokio::{
  sync::{Mutex as AsyncMutex, mpsc},
  time,
};

use super::{EnqueueResult, MailboxConfig, OverflowStrategy};
use crate::{error::MailboxError, messaging::Envelope};

#[cfg(test)]
mod tests;

/// Wait ceiling substituted for "no wait at all" on cooperative channel pushes.
///
/// The cooperative channel treats a timeout of exactly zero as "wait forever",
/// so every nominally non-blocking push is bounded by this epsilon instead.
/// Non-blocking pops go through `try_recv` and never suspend.
pub const NON_BLOCKING_TIMEOUT: Duration = Duration::from_millis(1);

struct DrainState {
  closed: bool,
  drain:  VecDeque<Envelope>,
}

/// FIFO queue of envelopes with an overflow policy and a close-then-drain
/// lifecycle.
///
/// While open, envelopes flow through a cooperative channel whose capacity is
/// the configured one (or the unbounded sentinel). `close` moves every
/// resident envelope into a synchronous drain queue so readers keep observing
/// already-accepted messages after the channel is gone; the drain queue is
/// the only source once closed.
///
/// FIFO ordering holds across enqueue/dequeue pairs for envelopes the policy
/// did not drop, under cooperative interleaving of a single producer and a
/// single consumer. Multi-producer use requires external ordering.
pub struct Mailbox {
  config:   MailboxConfig,
  sender:   Mutex<Option<mpsc::Sender<Envelope>>>,
  receiver: AsyncMutex<mpsc::Receiver<Envelope>>,
  state:    Mutex<DrainState>,
}

impl Mailbox {
  /// Creates a mailbox from the provided configuration.
  ///
  /// A bounded capacity of zero is clamped to one; the channel cannot hold
  /// fewer than one envelope.
  #[must_use]
  pub fn new(config: MailboxConfig) -> Self {
    let capacity = if config.is_bounded() { config.capacity().max(1) } else { MailboxConfig::UNBOUNDED_CAPACITY };
    let config = if config.is_bounded() { config.with_capacity(capacity) } else { config };
    let (sender, receiver) = mpsc::channel(capacity);
    Self {
      config,
      sender: Mutex::new(Some(sender)),
      receiver: AsyncMutex::new(receiver),
      state: Mutex::new(DrainState { closed: false, drain: VecDeque::new() }),
    }
  }

  /// Returns the mailbox configuration.
  #[must_use]
  pub const fn config(&self) -> &MailboxConfig {
    &self.config
  }

  /// Offers an envelope to the mailbox.
  ///
  /// When the mailbox is bounded and at capacity the configured
  /// [`OverflowStrategy`] decides the outcome; otherwise the envelope is
  /// pushed with the [`NON_BLOCKING_TIMEOUT`] grace so a consumer mid-poll
  /// can make room before the push is abandoned.
  ///
  /// # Errors
  ///
  /// Returns [`MailboxError::Closed`] when the mailbox was closed, and
  /// [`MailboxError::Overflow`] when the mailbox is full under
  /// [`OverflowStrategy::ThrowOnOverflow`].
  pub async fn enqueue(&self, envelope: Envelope) -> Result<EnqueueResult, MailboxError> {
    loop {
      let sender = {
        let state = self.state.lock();
        if state.closed {
          return Err(MailboxError::Closed);
        }
        drop(state);
        self.sender.lock().clone().ok_or(MailboxError::Closed)?
      };

      if self.config.is_bounded() && sender.capacity() == 0 {
        match self.config.strategy() {
          | OverflowStrategy::DropNewest => return Ok(EnqueueResult::Dropped),
          | OverflowStrategy::DropOldest => self.discard_oldest(),
          | OverflowStrategy::Backpressure => return Ok(EnqueueResult::Backpressured),
          | OverflowStrategy::ThrowOnOverflow => {
            return Err(MailboxError::Overflow {
              capacity: self.config.capacity(),
              strategy: OverflowStrategy::ThrowOnOverflow,
            });
          },
        }
      }

      // The send future owns its value and discards it when the grace window
      // abandons the push, so the channel is offered a clone.
      match time::timeout(NON_BLOCKING_TIMEOUT, sender.send(envelope.clone())).await {
        | Ok(Ok(())) => return Ok(EnqueueResult::Accepted),
        | Ok(Err(_)) => return Err(MailboxError::Closed),
        | Err(_) => {
          // The channel filled during the grace window; re-evaluate the policy.
        },
      }
    }
  }

  /// Removes and returns the next envelope without suspending.
  ///
  /// Once closed, drain-queue items are yielded until exhausted.
  #[must_use]
  pub fn dequeue(&self) -> Option<Envelope> {
    {
      let mut state = self.state.lock();
      if state.closed {
        return state.drain.pop_front();
      }
    }
    let mut receiver = self.receiver.try_lock().ok()?;
    receiver.try_recv().ok()
  }

  /// Waits cooperatively for the next envelope, bounded by `timeout`.
  ///
  /// Timeouts below [`NON_BLOCKING_TIMEOUT`] are clamped up to it; the
  /// channel treats a zero wait as an indefinite one.
  ///
  /// # Errors
  ///
  /// Returns [`MailboxError::Closed`] when the mailbox is closed and its
  /// drain queue is empty, and [`MailboxError::Timeout`] when no envelope
  /// arrived within `timeout`.
  pub async fn dequeue_blocking(&self, timeout: Duration) -> Result<Envelope, MailboxError> {
    {
      let mut state = self.state.lock();
      if state.closed {
        return state.drain.pop_front().ok_or(MailboxError::Closed);
      }
    }
    let wait = timeout.max(NON_BLOCKING_TIMEOUT);
    let mut receiver = self.receiver.lock().await;
    match time::timeout(wait, receiver.recv()).await {
      | Ok(Some(envelope)) => Ok(envelope),
      | Ok(None) => Err(MailboxError::Closed),
      | Err(_) => Err(MailboxError::Timeout { requested: timeout }),
    }
  }

  /// Returns the number of envelopes awaiting consumption.
  ///
  /// While open this is the channel length; once closed it is the drain
  /// queue length.
  #[must_use]
  pub fn len(&self) -> usize {
    let state = self.state.lock();
    if state.closed {
      return state.drain.len();
    }
    drop(state);
    self.channel_len()
  }

  /// Returns whether no envelope is awaiting consumption.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns whether the mailbox is at capacity. Never true when unbounded.
  #[must_use]
  pub fn is_full(&self) -> bool {
    if !self.config.is_bounded() {
      return false;
    }
    let state = self.state.lock();
    if state.closed {
      return state.drain.len() >= self.config.capacity();
    }
    drop(state);
    self.sender.lock().as_ref().is_some_and(|sender| sender.capacity() == 0)
  }

  /// Returns whether `close` has been called.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.state.lock().closed
  }

  /// Closes the mailbox. Idempotent.
  ///
  /// Every envelope still residing in the channel is moved into the drain
  /// queue before the channel is shut; the channel discards residual items on
  /// close, and draining first keeps already-accepted envelopes visible to
  /// readers.
  pub fn close(&self) {
    let mut state = self.state.lock();
    if state.closed {
      return;
    }
    state.closed = true;
    if let Ok(mut receiver) = self.receiver.try_lock() {
      while let Ok(envelope) = receiver.try_recv() {
        state.drain.push_back(envelope);
      }
      receiver.close();
    }
    *self.sender.lock() = None;
    tracing::debug!(drained = state.drain.len(), "mailbox closed");
  }

  fn channel_len(&self) -> usize {
    self.sender.lock().as_ref().map_or(0, |sender| sender.max_capacity() - sender.capacity())
  }

  fn discard_oldest(&self) {
    if let Ok(mut receiver) = self.receiver.try_lock() {
      let _ = receiver.try_recv();
    }
  }
}
