//! Top-level facade crate for hookgate.
//!
//! Re-exports the protocol/transcoder core and the hook runtime so users can
//! depend on a single crate.

pub mod core {
    pub use hookgate_core::*;
}

pub mod runtime {
    pub use hookgate_runtime::*;
}
