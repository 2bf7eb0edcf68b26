use std::{
  error::Error,
  fmt,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use coract_runtime_rs::{FutureError, FutureFailure, FutureSlot, Runtime};
use parking_lot::Mutex;

#[derive(Debug)]
struct AskTimedOut;

impl fmt::Display for AskTimedOut {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ask timed out")
  }
}

impl Error for AskTimedOut {}

#[test]
fn a_cooperative_producer_resolves_every_awaiter() {
  let runtime = Runtime::default();
  let slot = FutureSlot::new();
  let observed = Arc::new(Mutex::new(Vec::new()));

  for _ in 0..2 {
    let listener = slot.listen();
    let observed = observed.clone();
    runtime.spawn(async move {
      let result = listener.await.ok();
      observed.lock().push(result);
    });
  }

  let producer = slot.clone();
  runtime.spawn(async move {
    Runtime::sleep(Duration::from_millis(10)).await;
    producer.resolve(42_u32);
  });

  runtime.run().expect("run");

  assert_eq!(*observed.lock(), vec![Some(42), Some(42)]);
}

#[test]
fn timeouts_are_arranged_externally_with_a_timer_that_fails_the_slot() {
  let runtime = Runtime::default();
  let slot = FutureSlot::<u32>::new();
  let observed = Arc::new(Mutex::new(None));

  let listener = slot.listen();
  let cell = observed.clone();
  runtime.spawn(async move {
    *cell.lock() = Some(listener.await);
  });

  let expiring = slot.clone();
  runtime.schedule_once(Duration::from_millis(10), move || {
    let failure: FutureFailure = Arc::new(AskTimedOut);
    expiring.fail(failure);
  });

  runtime.run().expect("run");

  match observed.lock().take() {
    | Some(Err(FutureError::Failed(cause))) => assert_eq!(cause.to_string(), "ask timed out"),
    | other => panic!("expected a failed await, got {other:?}"),
  };
}

#[test]
fn cancellation_unblocks_awaiters_and_runs_callbacks_on_the_cancelling_task() {
  let runtime = Runtime::default();
  let slot = FutureSlot::<u32>::new();
  let cancel_callbacks = Arc::new(AtomicUsize::new(0));
  let observed = Arc::new(Mutex::new(None));

  let counter = cancel_callbacks.clone();
  slot.on_cancel(move || {
    counter.fetch_add(1, Ordering::SeqCst);
  });

  let listener = slot.listen();
  let cell = observed.clone();
  runtime.spawn(async move {
    *cell.lock() = Some(listener.await);
  });

  let canceller = slot.clone();
  runtime.schedule_once(Duration::from_millis(10), move || {
    canceller.cancel();
  });

  runtime.run().expect("run");

  assert!(matches!(observed.lock().take(), Some(Err(FutureError::Cancelled))));
  assert_eq!(cancel_callbacks.load(Ordering::SeqCst), 1);
  assert!(slot.is_resolved());
}

#[test]
fn resolving_twice_keeps_the_first_value() {
  let runtime = Runtime::default();
  let slot = FutureSlot::new();
  let observed = Arc::new(Mutex::new(None));

  let listener = slot.listen();
  let cell = observed.clone();
  runtime.spawn(async move {
    *cell.lock() = Some(listener.await.ok());
  });

  let first = slot.clone();
  runtime.schedule_once(Duration::from_millis(5), move || {
    first.resolve(1_u32);
  });
  let second = slot.clone();
  runtime.schedule_once(Duration::from_millis(20), move || {
    second.resolve(2_u32);
  });

  runtime.run().expect("run");

  assert_eq!(observed.lock().take(), Some(Some(1)));
}
