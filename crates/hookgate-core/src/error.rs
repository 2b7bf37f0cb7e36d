//! Shared error type across hookgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// A before-hook refused the message.
    Rejected,
    /// Unsupported config or protocol version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Rejected => "REJECTED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HookgateError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum HookgateError {
    /// Typed message could not be turned into a dynamic map.
    #[error("encode failed: {0}")]
    Encode(String),
    /// Dynamic map could not be mapped back onto the message schema.
    #[error("decode failed: {0}")]
    Decode(String),
    /// The scripted callback itself failed.
    #[error("callback failed: {0}")]
    Callback(String),
    /// The scripted callback explicitly refused the message.
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HookgateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HookgateError::Encode(_) => ClientCode::Internal,
            HookgateError::Decode(_) => ClientCode::BadRequest,
            HookgateError::Callback(_) => ClientCode::Internal,
            HookgateError::Rejected(_) => ClientCode::Rejected,
            HookgateError::BadRequest(_) => ClientCode::BadRequest,
            HookgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HookgateError::Internal(_) => ClientCode::Internal,
        }
    }
}
