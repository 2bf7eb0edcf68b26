//! Cooperative scheduler lifecycle.

use std::{
  future::Future,
  io,
  pin::Pin,
  sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
  },
  time::Duration,
};

use parking_lot::Mutex;
use tokio::{
  runtime::{Builder, Handle},
  time,
};

use super::TaskMonitor;
use crate::{
  config::RuntimeConfig,
  mailbox::{Mailbox, MailboxConfig},
  scheduler::{Cancellable, TimerRegistry},
};


/// Stable tag published by this binding and used as the spawn-id prefix.
pub const RUNTIME_NAME: &str = "tokio";

/// Minimum effective timer delay; the host scheduler's granularity. Delays
/// below it are clamped up.
pub const MIN_TIMER_DELAY: Duration = Duration::from_millis(1);

type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
type OnceCallback = Box<dyn FnOnce() + Send + 'static>;
type RepeatingCallback = Box<dyn FnMut() + Send + 'static>;

struct PendingSpawn {
  id:   String,
  task: BoxedTask,
}

struct PendingTimer {
  cancelled: Arc<AtomicBool>,
  install:   Box<dyn FnOnce(&Arc<RuntimeCore>, &Handle) + Send>,
}

#[derive(Default)]
struct PendingWork {
  spawns: Vec<PendingSpawn>,
  timers: Vec<PendingTimer>,
}

struct RuntimeCore {
  config:           RuntimeConfig,
  timers:           Arc<TimerRegistry>,
  monitor:          TaskMonitor,
  running:          AtomicBool,
  inside_scheduler: AtomicBool,
  next_task_id:     AtomicU64,
  handle:           Mutex<Option<Handle>>,
  pending:          Mutex<PendingWork>,
}

/// Cooperative runtime binding: accepts spawns and timer requests before or
/// during execution, runs the scheduler, and quiesces on shutdown.
///
/// All tasks, timer callbacks, and channel operations share one OS thread
/// inside [`Runtime::run`]; suspension points are explicit (sleeps, yields,
/// channel pushes and pops, timer waits). Cloning the runtime yields another
/// handle onto the same instance.
pub struct Runtime {
  core: Arc<RuntimeCore>,
}

impl Runtime {
  /// Creates a runtime with the provided configuration.
  #[must_use]
  pub fn new(config: RuntimeConfig) -> Self {
    Self {
      core: Arc::new(RuntimeCore {
        config,
        timers: Arc::new(TimerRegistry::new()),
        monitor: TaskMonitor::new(),
        running: AtomicBool::new(false),
        inside_scheduler: AtomicBool::new(false),
        next_task_id: AtomicU64::new(0),
        handle: Mutex::new(None),
        pending: Mutex::new(PendingWork::default()),
      }),
    }
  }

  /// Returns the stable identifier this binding publishes.
  #[must_use]
  pub const fn name() -> &'static str {
    RUNTIME_NAME
  }

  /// Returns the runtime configuration.
  #[must_use]
  pub fn config(&self) -> &RuntimeConfig {
    &self.core.config
  }

  /// Creates a mailbox from the provided configuration.
  ///
  /// A bounded configuration carrying a zero capacity receives the
  /// configured default mailbox capacity. The returned mailbox requires the
  /// scheduler to be running for its cooperative operations to make
  /// progress.
  #[must_use]
  pub fn create_mailbox(&self, config: MailboxConfig) -> Mailbox {
    let config = if config.is_bounded() && config.capacity() == 0 {
      config.with_capacity(self.core.config.default_mailbox_capacity())
    } else {
      config
    };
    tracing::trace!(bounded = config.is_bounded(), capacity = config.capacity(), "mailbox created");
    Mailbox::new(config)
  }

  /// Spawns a task, returning its assigned id.
  ///
  /// While the scheduler is running the task starts immediately; otherwise
  /// it is queued and started by the next [`Runtime::run`] in submission
  /// order.
  pub fn spawn<F>(&self, task: F) -> String
  where
    F: Future<Output = ()> + Send + 'static, {
    let id = format!("{RUNTIME_NAME}-{}", self.core.next_task_id.fetch_add(1, Ordering::SeqCst));
    let live = self.core.monitor.active_count();
    if live >= self.core.config.max_coroutines() {
      tracing::warn!(live, limit = self.core.config.max_coroutines(), "advisory coroutine ceiling exceeded");
    }
    let handle = self.core.handle.lock().clone();
    match handle {
      | Some(handle) => RuntimeCore::spawn_tracked(&self.core, &handle, id.clone(), Box::pin(task)),
      | None => {
        self.core.pending.lock().spawns.push(PendingSpawn { id: id.clone(), task: Box::pin(task) });
      },
    }
    id
  }

  /// Schedules `callback` to run once after `delay` (clamped to
  /// [`MIN_TIMER_DELAY`]).
  ///
  /// Outside the scheduler the timer is queued as a thunk and materialised
  /// at scheduler start; the returned handle then revokes the queued thunk
  /// rather than a live timer.
  pub fn schedule_once(&self, delay: Duration, callback: impl FnOnce() + Send + 'static) -> Cancellable {
    let handle = self.core.handle.lock().clone();
    match handle {
      | Some(handle) => RuntimeCore::install_once(&self.core, &handle, delay, Box::new(callback)),
      | None => self.defer_timer(move |core, handle| {
        let _ = RuntimeCore::install_once(core, handle, delay, Box::new(callback));
      }),
    }
  }

  /// Schedules `callback` to run after `initial_delay` and then at every
  /// `interval` tick (both clamped to [`MIN_TIMER_DELAY`]).
  ///
  /// The returned handle holds the initial-delay timer: cancelling it before
  /// the first firing prevents any invocation, while cancelling after the
  /// first firing leaves the recurring timer in place. [`Runtime::shutdown`]
  /// clears recurring timers.
  pub fn schedule_repeatedly(
    &self,
    initial_delay: Duration,
    interval: Duration,
    callback: impl FnMut() + Send + 'static,
  ) -> Cancellable {
    let handle = self.core.handle.lock().clone();
    match handle {
      | Some(handle) => RuntimeCore::install_repeating(&self.core, &handle, initial_delay, interval, Box::new(callback)),
      | None => self.defer_timer(move |core, handle| {
        let _ = RuntimeCore::install_repeating(core, handle, initial_delay, interval, Box::new(callback));
      }),
    }
  }

  /// Surrenders control to the scheduler.
  pub async fn yield_now() {
    tokio::task::yield_now().await;
  }

  /// Suspends the calling task for `duration`. No-op when zero.
  pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
      return;
    }
    time::sleep(duration).await;
  }

  /// Enters the scheduler: drains pending timers and spawns in submission
  /// order, then blocks until every coroutine and timer has completed.
  ///
  /// A call while the scheduler is already running is a no-op; concurrent
  /// runs are unsupported. After quiescence the runtime may be run again.
  ///
  /// # Errors
  ///
  /// Returns the host scheduler's build failure.
  pub fn run(&self) -> io::Result<()> {
    if self.core.running.swap(true, Ordering::SeqCst) {
      tracing::warn!("run requested while the scheduler is active; ignored");
      return Ok(());
    }

    let mut builder = Builder::new_current_thread();
    if self.core.config.enable_coroutine_hook() {
      builder.enable_all();
    } else {
      builder.enable_time();
    }
    let host = match builder.build() {
      | Ok(host) => host,
      | Err(error) => {
        self.core.running.store(false, Ordering::SeqCst);
        return Err(error);
      },
    };

    let handle = host.handle().clone();
    *self.core.handle.lock() = Some(handle.clone());
    self.core.inside_scheduler.store(true, Ordering::SeqCst);

    let core = self.core.clone();
    host.block_on(async move {
      let (timers, spawns) = {
        let mut pending = core.pending.lock();
        (std::mem::take(&mut pending.timers), std::mem::take(&mut pending.spawns))
      };
      tracing::debug!(timers = timers.len(), spawns = spawns.len(), "scheduler entered");
      for timer in timers {
        if !timer.cancelled.load(Ordering::SeqCst) {
          (timer.install)(&core, &handle);
        }
      }
      for spawn in spawns {
        RuntimeCore::spawn_tracked(&core, &handle, spawn.id, spawn.task);
      }
      core.monitor.idle().await;
    });

    self.core.inside_scheduler.store(false, Ordering::SeqCst);
    *self.core.handle.lock() = None;
    self.core.running.store(false, Ordering::SeqCst);
    tracing::debug!("scheduler quiesced");
    Ok(())
  }

  /// Clears every tracked timer so recurring timers no longer keep the
  /// scheduler alive.
  ///
  /// In-flight coroutines are not cancelled; they must observe cooperation
  /// points and exit on their own. `_timeout` is accepted for signature
  /// compatibility and not consulted by the current contract.
  pub fn shutdown(&self, _timeout: Duration) {
    let cleared = self.core.timers.clear();
    tracing::debug!(cleared, "shutdown requested; timers cleared");
  }

  /// Returns whether a `run` call is in progress.
  #[must_use]
  pub fn is_running(&self) -> bool {
    self.core.running.load(Ordering::SeqCst)
  }

  /// Returns whether the scheduler block is currently executing.
  #[must_use]
  pub fn is_inside_scheduler(&self) -> bool {
    self.core.inside_scheduler.load(Ordering::SeqCst)
  }

  /// Returns the number of live tracked coroutines and timers.
  #[must_use]
  pub fn active_task_count(&self) -> usize {
    self.core.monitor.active_count()
  }

  /// Returns the number of timers that may still fire.
  #[must_use]
  pub fn live_timer_count(&self) -> usize {
    self.core.timers.live_count()
  }

  fn defer_timer(&self, install: impl FnOnce(&Arc<RuntimeCore>, &Handle) + Send + 'static) -> Cancellable {
    let cancelled = Arc::new(AtomicBool::new(false));
    self.core.pending.lock().timers.push(PendingTimer { cancelled: cancelled.clone(), install: Box::new(install) });
    Cancellable::deferred(cancelled)
  }
}

impl Clone for Runtime {
  fn clone(&self) -> Self {
    Self { core: self.core.clone() }
  }
}

impl Default for Runtime {
  fn default() -> Self {
    Self::new(RuntimeConfig::default())
  }
}

impl RuntimeCore {
  fn spawn_tracked(core: &Arc<Self>, handle: &Handle, id: String, task: BoxedTask) {
    core.monitor.register();
    let task_core = core.clone();
    handle.spawn(async move {
      tracing::trace!(task = %id, "task started");
      task.await;
      tracing::trace!(task = %id, "task completed");
      // The run loop may exit as soon as the count reaches zero; nothing may
      // follow this call.
      task_core.monitor.complete();
    });
  }

  fn install_once(core: &Arc<Self>, handle: &Handle, delay: Duration, callback: OnceCallback) -> Cancellable {
    let (id, revoked) = core.timers.register();
    core.monitor.register();
    let task_core = core.clone();
    handle.spawn(async move {
      tokio::select! {
        () = time::sleep(clamp_delay(delay)) => {
          if task_core.timers.take(id) {
            callback();
          }
        },
        () = revoked.notified() => {},
      }
      task_core.monitor.complete();
    });
    tracing::trace!(timer = %id, delay_ms = delay.as_millis() as u64, "one-shot timer installed");
    Cancellable::timer_backed(core.timers.clone(), id)
  }

  fn install_repeating(
    core: &Arc<Self>,
    handle: &Handle,
    initial_delay: Duration,
    interval: Duration,
    mut callback: RepeatingCallback,
  ) -> Cancellable {
    let (initial_id, revoked) = core.timers.register();
    core.monitor.register();
    let task_core = core.clone();
    handle.spawn(async move {
      tokio::select! {
        () = time::sleep(clamp_delay(initial_delay)) => {
          if task_core.timers.take(initial_id) {
            callback();
            task_core.run_ticks(interval, callback).await;
          }
        },
        () = revoked.notified() => {},
      }
      task_core.monitor.complete();
    });
    tracing::trace!(timer = %initial_id, "repeating timer installed");
    Cancellable::timer_backed(core.timers.clone(), initial_id)
  }

  /// Drives the recurring half of a repeating schedule until its registry
  /// entry is revoked.
  async fn run_ticks(&self, interval: Duration, mut callback: RepeatingCallback) {
    let (tick_id, revoked) = self.timers.register();
    loop {
      tokio::select! {
        () = time::sleep(clamp_delay(interval)) => {
          if !self.timers.contains(tick_id) {
            break;
          }
          callback();
        },
        () = revoked.notified() => break,
      }
    }
  }
}

const fn clamp_delay(delay: Duration) -> Duration {
  if delay.as_millis() < MIN_TIMER_DELAY.as_millis() { MIN_TIMER_DELAY } else { delay }
}
