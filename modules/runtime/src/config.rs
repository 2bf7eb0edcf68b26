//! Configuration package.
//!
//! This module contains the immutable runtime configuration record.

mod runtime_config;

pub use runtime_config::RuntimeConfig;
