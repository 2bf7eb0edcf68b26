use std::time::{Duration, Instant};

use super::{Mailbox, NON_BLOCKING_TIMEOUT};
use crate::{
  error::MailboxError,
  mailbox::{EnqueueResult, MailboxConfig, OverflowStrategy},
  messaging::Envelope,
};

fn bounded(capacity: usize, strategy: OverflowStrategy) -> Mailbox {
  Mailbox::new(MailboxConfig::bounded(capacity, strategy))
}

#[tokio::test]
async fn drop_newest_discards_the_offered_envelope() {
  let mailbox = bounded(2, OverflowStrategy::DropNewest);
  let first = Envelope::new(1_u32);
  let second = Envelope::new(2_u32);
  let third = Envelope::new(3_u32);

  assert_eq!(mailbox.enqueue(first.clone()).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(second.clone()).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(third).await, Ok(EnqueueResult::Dropped));

  assert_eq!(mailbox.len(), 2);
  assert_eq!(mailbox.dequeue(), Some(first));
  assert_eq!(mailbox.dequeue(), Some(second));
}

#[tokio::test]
async fn drop_oldest_keeps_the_most_recent_envelopes() {
  let mailbox = bounded(2, OverflowStrategy::DropOldest);
  let first = Envelope::new(1_u32);
  let second = Envelope::new(2_u32);
  let third = Envelope::new(3_u32);

  assert_eq!(mailbox.enqueue(first).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(second.clone()).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(third.clone()).await, Ok(EnqueueResult::Accepted));

  assert_eq!(mailbox.len(), 2);
  assert_eq!(mailbox.dequeue(), Some(second));
  assert_eq!(mailbox.dequeue(), Some(third));
}

#[tokio::test]
async fn backpressure_leaves_the_mailbox_untouched() {
  let mailbox = bounded(1, OverflowStrategy::Backpressure);
  let resident = Envelope::new("resident");

  assert_eq!(mailbox.enqueue(resident.clone()).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(Envelope::new("rejected")).await, Ok(EnqueueResult::Backpressured));

  assert_eq!(mailbox.len(), 1);
  assert_eq!(mailbox.dequeue(), Some(resident));
}

#[tokio::test]
async fn throw_on_overflow_surfaces_capacity_and_strategy() {
  let mailbox = bounded(1, OverflowStrategy::ThrowOnOverflow);

  assert_eq!(mailbox.enqueue(Envelope::new(1_u8)).await, Ok(EnqueueResult::Accepted));
  let result = mailbox.enqueue(Envelope::new(2_u8)).await;

  assert_eq!(result, Err(MailboxError::Overflow { capacity: 1, strategy: OverflowStrategy::ThrowOnOverflow }));
}

#[tokio::test]
async fn close_preserves_accepted_envelopes_for_readers() {
  let mailbox = Mailbox::new(MailboxConfig::unbounded());
  let first = Envelope::new(1_u32);
  let second = Envelope::new(2_u32);

  assert_eq!(mailbox.enqueue(first.clone()).await, Ok(EnqueueResult::Accepted));
  assert_eq!(mailbox.enqueue(second.clone()).await, Ok(EnqueueResult::Accepted));

  mailbox.close();
  assert!(mailbox.is_closed());
  assert_eq!(mailbox.len(), 2);
  assert_eq!(mailbox.dequeue(), Some(first));
  assert_eq!(mailbox.dequeue(), Some(second));
  assert_eq!(mailbox.dequeue(), None);
}

#[tokio::test]
async fn enqueue_after_close_reports_closed() {
  let mailbox = Mailbox::new(MailboxConfig::unbounded());
  mailbox.close();
  mailbox.close();

  assert_eq!(mailbox.enqueue(Envelope::new(1_u8)).await, Err(MailboxError::Closed));
}

#[tokio::test]
async fn dequeue_blocking_after_close_drains_then_fails() {
  let mailbox = Mailbox::new(MailboxConfig::unbounded());
  let resident = Envelope::new("left over");
  assert_eq!(mailbox.enqueue(resident.clone()).await, Ok(EnqueueResult::Accepted));
  mailbox.close();

  assert_eq!(mailbox.dequeue_blocking(Duration::from_millis(10)).await, Ok(resident));
  assert_eq!(mailbox.dequeue_blocking(Duration::from_millis(10)).await, Err(MailboxError::Closed));
}

#[tokio::test]
async fn dequeue_blocking_times_out_on_an_empty_mailbox() {
  let mailbox = Mailbox::new(MailboxConfig::unbounded());
  let requested = Duration::from_millis(10);

  let result = mailbox.dequeue_blocking(requested).await;

  assert_eq!(result, Err(MailboxError::Timeout { requested }));
}

#[tokio::test]
async fn unbounded_mailboxes_never_report_full() {
  let mailbox = Mailbox::new(MailboxConfig::unbounded());

  for value in 0..16_u32 {
    assert_eq!(mailbox.enqueue(Envelope::new(value)).await, Ok(EnqueueResult::Accepted));
  }

  assert!(!mailbox.is_full());
  assert_eq!(mailbox.len(), 16);
}

#[tokio::test]
async fn zero_capacity_is_clamped_to_one() {
  let mailbox = bounded(0, OverflowStrategy::DropNewest);

  assert_eq!(mailbox.config().capacity(), 1);
  assert_eq!(mailbox.enqueue(Envelope::new(1_u8)).await, Ok(EnqueueResult::Accepted));
  assert!(mailbox.is_full());
}

#[tokio::test]
async fn full_mailbox_pushes_stay_within_the_non_blocking_bound() {
  let mailbox = bounded(1, OverflowStrategy::DropNewest);
  assert_eq!(mailbox.enqueue(Envelope::new(0_u8)).await, Ok(EnqueueResult::Accepted));

  let started = Instant::now();
  for value in 1..8_u8 {
    assert_eq!(mailbox.enqueue(Envelope::new(value)).await, Ok(EnqueueResult::Dropped));
  }
  let elapsed = started.elapsed();

  // Seven policy rejections must not suspend anywhere near seven grace windows
  // plus scheduling slack.
  assert!(elapsed < NON_BLOCKING_TIMEOUT * 7 + Duration::from_millis(50), "elapsed {elapsed:?}");
}
