use super::TimerRegistry;

#[test]
fn register_mints_unique_ids() {
  let registry = TimerRegistry::new();
  let (first, _) = registry.register();
  let (second, _) = registry.register();

  assert_ne!(first, second);
  assert_eq!(registry.live_count(), 2);
}

#[test]
fn take_claims_the_firing_exactly_once() {
  let registry = TimerRegistry::new();
  let (id, _) = registry.register();

  assert!(registry.take(id));
  assert!(!registry.take(id));
  assert!(!registry.contains(id));
}

#[test]
fn cancel_revokes_only_live_entries() {
  let registry = TimerRegistry::new();
  let (id, _) = registry.register();

  assert!(registry.cancel(id));
  assert!(!registry.cancel(id));
}

#[test]
fn clear_revokes_everything() {
  let registry = TimerRegistry::new();
  for _ in 0..3 {
    let _ = registry.register();
  }

  assert_eq!(registry.clear(), 3);
  assert_eq!(registry.live_count(), 0);
}
