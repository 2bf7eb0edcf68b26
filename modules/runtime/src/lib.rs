#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_types, clippy::redundant_clone,))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(not(test), deny(clippy::redundant_clone))]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::unnecessary_to_owned)]
#![deny(clippy::unnecessary_struct_initialization)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_ok_or)]
#![deny(clippy::manual_map)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::manual_strip)]
#![deny(clippy::unused_async)]
#![deny(clippy::unnecessary_wraps)]
#![deny(clippy::unreachable)]
#![deny(clippy::empty_enums)]
#![deny(clippy::no_effect)]
#![deny(dropping_copy_types)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::from_over_into)]
#![deny(clippy::eq_op)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]
#![deny(clippy::manual_assert)]
#![deny(clippy::if_same_then_else)]
#![deny(unreachable_pub)]

//! Coroutine runtime substrate for the coract actor system.
//!
//! This crate provides the concurrency primitives a higher-level actor layer
//! is built on: a cooperative scheduler lifecycle ([`Runtime`]), an envelope
//! queue with overflow policies and a close-then-drain contract ([`Mailbox`]),
//! a single-assignment rendezvous cell ([`FutureSlot`]), and cancellation
//! handles for scheduled timers ([`Cancellable`]). Actor identity,
//! supervision, and message routing live outside this crate and consume these
//! primitives.

pub mod config;
pub mod error;
pub mod futures;
pub mod mailbox;
pub mod messaging;
pub mod runtime;
pub mod scheduler;

pub use config::RuntimeConfig;
pub use error::{FutureError, FutureFailure, MailboxError};
pub use futures::{FutureSlot, FutureSlotListener};
pub use mailbox::{EnqueueResult, Mailbox, MailboxConfig, NON_BLOCKING_TIMEOUT, OverflowStrategy};
pub use messaging::Envelope;
pub use runtime::{MIN_TIMER_DELAY, RUNTIME_NAME, Runtime};
pub use scheduler::{Cancellable, TimerId};
