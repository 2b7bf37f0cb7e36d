//! hookgate runtime library entry.
//!
//! This crate wires the callback registry, session context, hook dispatcher,
//! failure reporting and message lifecycle into one runtime. It is consumed by
//! the server embedding it and by integration tests.
//!
//! The scripting engine, the transport, and session lifecycle stay outside:
//! they meet this crate only through the [`registry::HookCallback`],
//! [`registry::CallbackRegistry`] and [`context::Session`] traits.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod obs;
pub mod registry;
