//! hookgate core: transport-agnostic protocol messages, the structured
//! transcoder, and the shared error type.
//!
//! This crate defines the wire-level message schema that hooks intercept and
//! the conversion between those typed messages and the dynamic maps handed to
//! scripted callbacks. It carries no runtime or transport dependencies so the
//! schema can be reused by tooling and tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible
//! path surfaces as `HookgateError`/`Result` so a malformed callback result
//! can never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod transcode;

/// Shared result type.
pub use error::{Result, HookgateError};
pub use transcode::DynamicMap;
