use std::sync::Arc;

use arc_swap::ArcSwap;
use uuid::Uuid;

/// Read-only view of a live session, owned elsewhere.
///
/// Implementations must make `current_handle` safe to call while another task
/// renames the user; a recent value is good enough.
pub trait Session: Send + Sync {
    fn user_id(&self) -> Uuid;
    fn current_handle(&self) -> String;
    /// Session expiry, unix seconds.
    fn expiry(&self) -> i64;
}

/// Identity handed to every callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub handle: String,
    pub expiry: i64,
}

impl SessionIdentity {
    pub fn new(user_id: Uuid, handle: impl Into<String>, expiry: i64) -> Self {
        Self {
            user_id,
            handle: handle.into(),
            expiry,
        }
    }

    /// No session yet: nil user id, empty handle, zero expiry.
    pub fn anonymous() -> Self {
        Self::new(Uuid::nil(), String::new(), 0)
    }

    /// Snapshot the session's identity, or the anonymous identity when absent.
    /// The session is only read.
    pub fn extract(session: Option<&dyn Session>) -> Self {
        match session {
            Some(s) => Self::new(s.user_id(), s.current_handle(), s.expiry()),
            None => Self::anonymous(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_nil()
    }
}

/// Session whose handle can be changed while hooks are reading it.
///
/// Reads and renames never block each other.
#[derive(Debug)]
pub struct GatewaySession {
    user_id: Uuid,
    handle: ArcSwap<String>,
    expiry: i64,
}

impl GatewaySession {
    pub fn new(user_id: Uuid, handle: &str, expiry: i64) -> Self {
        Self {
            user_id,
            handle: ArcSwap::from_pointee(handle.to_string()),
            expiry,
        }
    }

    pub fn set_handle(&self, handle: &str) {
        self.handle.store(Arc::new(handle.to_string()));
    }
}

impl Session for GatewaySession {
    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn current_handle(&self) -> String {
        String::clone(&self.handle.load_full())
    }

    fn expiry(&self) -> i64 {
        self.expiry
    }
}
