//! Callback registry seam.
//!
//! The scripting engine owns callback bodies; this module only defines how the
//! dispatcher finds and calls them. Re-exports the traits and the in-memory
//! registry so downstream consumers can depend on this module directly.

pub mod callback;
pub mod memory;

use std::fmt;
use std::sync::Arc;

pub use callback::{after_fn, before_fn, CallbackFailure, HookCallback};
pub use memory::HookRegistry;

/// Lifecycle phase a callback is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    After,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup of at most one callback per (phase, kind).
///
/// Called concurrently from every dispatch; must be a pure read.
pub trait CallbackRegistry: Send + Sync {
    fn lookup(&self, phase: Phase, kind: &str) -> Option<Arc<dyn HookCallback>>;

    /// Every bound (phase, kind), for startup checks.
    fn registered(&self) -> Vec<(Phase, String)>;
}
