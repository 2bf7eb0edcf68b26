//! Owned representation of a dynamically typed message.

use std::{
  any::{Any, TypeId},
  fmt,
  sync::Arc,
};

#[cfg(test)]
mod tests;

/// Owned, immutable message object carried by mailboxes.
///
/// The mailbox never inspects the payload; consumers downcast it back to the
/// concrete type they expect. Cloning an envelope shares the payload, and
/// equality is identity of the shared payload, not structural comparison.
pub struct Envelope {
  payload: Arc<dyn Any + Send + Sync>,
  type_id: TypeId,
}

impl Envelope {
  /// Wraps the provided payload in a new envelope.
  #[must_use]
  pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
    Self { payload: Arc::new(payload), type_id: TypeId::of::<T>() }
  }

  /// Returns the [`TypeId`] of the payload.
  #[must_use]
  pub const fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// Attempts to downcast the payload reference to the requested type.
  #[must_use]
  pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
    self.payload.downcast_ref::<T>()
  }

  /// Returns whether both envelopes share the same payload instance.
  #[must_use]
  pub fn same_instance(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.payload, &other.payload)
  }
}

impl Clone for Envelope {
  fn clone(&self) -> Self {
    Self { payload: self.payload.clone(), type_id: self.type_id }
  }
}

impl PartialEq for Envelope {
  fn eq(&self, other: &Self) -> bool {
    self.same_instance(other)
  }
}

impl Eq for Envelope {}

impl fmt::Debug for Envelope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Envelope").field("type_id", &self.type_id).finish_non_exhaustive()
  }
}
