//! Authentication request: sent before any session exists.

use serde::{Deserialize, Serialize};

use super::is_zero;

/// Every credential kind, in declaration order.
pub const AUTH_KINDS: &[&str] = &[
    "Email",
    "Custom",
    "Device",
    "Facebook",
    "Google",
    "GameCenter",
    "Steam",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateRequest {
    pub cid: Option<String>,
    pub id: AuthId,
}

impl AuthenticateRequest {
    pub fn new(id: AuthId) -> Self {
        Self { cid: None, id }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Hook kind for this request: the bare credential name (`"Email"`,
    /// `"Device"`, ...). Both hook phases key on this same string.
    pub fn kind(&self) -> &'static str {
        self.id.kind()
    }
}

/// Credential one-of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthId {
    Email(EmailCredentials),
    Custom(String),
    Device(String),
    Facebook(String),
    Google(String),
    GameCenter(GameCenterCredentials),
    Steam(String),
}

impl AuthId {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthId::Email(_) => "Email",
            AuthId::Custom(_) => "Custom",
            AuthId::Device(_) => "Device",
            AuthId::Facebook(_) => "Facebook",
            AuthId::Google(_) => "Google",
            AuthId::GameCenter(_) => "GameCenter",
            AuthId::Steam(_) => "Steam",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EmailCredentials {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// Apple GameCenter identity verification payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GameCenterCredentials {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub player_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bundle_id: String,
    #[serde(with = "super::int64", skip_serializing_if = "is_zero")]
    pub timestamp: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub salt: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub public_key_url: String,
}
