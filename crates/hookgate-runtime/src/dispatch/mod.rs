//! Dispatcher module exports.
//!
//! Re-exports the hook dispatcher and the lifecycle pipeline so downstream
//! consumers can depend on this module directly.

pub mod dispatcher;
pub mod lifecycle;

pub use dispatcher::HookDispatcher;
pub use lifecycle::{LifecycleState, MessageProcessor, Outcome, Pipeline};
