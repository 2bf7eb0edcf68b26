use std::{sync::Arc, time::Duration};

use super::TaskMonitor;

#[tokio::test]
async fn idle_returns_immediately_with_no_tracked_tasks() {
  let monitor = TaskMonitor::new();

  monitor.idle().await;
  assert_eq!(monitor.active_count(), 0);
}

#[tokio::test]
async fn idle_waits_for_the_last_completion() {
  let monitor = Arc::new(TaskMonitor::new());
  monitor.register();
  monitor.register();

  let completer = monitor.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(5)).await;
    completer.complete();
    completer.complete();
  });

  monitor.idle().await;
  assert_eq!(monitor.active_count(), 0);
}
