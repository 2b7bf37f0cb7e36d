//! Protocol modules (realtime envelope + authentication request).
//!
//! Both message families are "one-of" shaped: a top-level object carrying an
//! optional collation id (`cid`) and exactly one payload keyed by its
//! lowerCamelCase wire name, e.g. `{"cid": "7", "chatMessage": {...}}`.
//!
//! Field names follow the canonical wire schema, never internal numbering.
//! Empty/default fields are omitted on output and defaulted on input, so a
//! callback may hand back a partial payload. `int64` fields also read from
//! decimal strings and integral floats.

pub mod auth;
pub mod envelope;

mod b64;
mod int64;

pub use auth::{AuthId, AuthenticateRequest, EmailCredentials, GameCenterCredentials, AUTH_KINDS};
pub use envelope::{Envelope, Message, ENVELOPE_KINDS};

pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}
