//! Session context types shared across layers.
//!
//! Hooks see the acting principal as a [`SessionIdentity`]; where it comes
//! from (an established session, an authentication result, or nobody) is
//! decided by the dispatcher entry point.

pub mod session;

pub use session::{GatewaySession, Session, SessionIdentity};
