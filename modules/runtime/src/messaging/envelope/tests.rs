use std::any::TypeId;

use super::Envelope;

#[test]
fn clones_share_identity() {
  let envelope = Envelope::new(42_u32);
  let clone = envelope.clone();

  assert_eq!(envelope, clone);
  assert!(envelope.same_instance(&clone));
}

#[test]
fn distinct_envelopes_are_not_equal_even_with_equal_payloads() {
  let first = Envelope::new(7_u8);
  let second = Envelope::new(7_u8);

  assert_ne!(first, second);
}

#[test]
fn downcast_recovers_the_payload() {
  let envelope = Envelope::new(String::from("ping"));

  assert_eq!(envelope.type_id(), TypeId::of::<String>());
  assert_eq!(envelope.downcast_ref::<String>().map(String::as_str), Some("ping"));
  assert!(envelope.downcast_ref::<u32>().is_none());
}
