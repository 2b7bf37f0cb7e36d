//! Realtime envelope: the message family carried over an established session.

use serde::{Deserialize, Serialize};

use super::is_zero;

/// Every kind an envelope can carry, in declaration order.
pub const ENVELOPE_KINDS: &[&str] = &[
    "Logout",
    "Link",
    "Unlink",
    "SelfFetch",
    "SelfUpdate",
    "UsersFetch",
    "FriendsAdd",
    "FriendsRemove",
    "GroupsCreate",
    "TopicsJoin",
    "TopicsLeave",
    "TopicMessageSend",
    "ChatMessage",
    "MatchCreate",
    "MatchesJoin",
    "MatchDataSend",
    "MatchesLeave",
    "Rpc",
];

/// Realtime envelope. Replaced wholesale, never patched, when a before-hook
/// rewrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Collation id echoed back on the response, if the client set one.
    pub cid: Option<String>,
    pub message: Message,
}

impl Envelope {
    pub fn new(message: Message) -> Self {
        Self { cid: None, message }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Stable kind string of the active message.
    pub fn kind(&self) -> &'static str {
        self.message.kind()
    }
}

/// The one-of payload. Wire key is the lowerCamelCase variant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    Logout(Logout),
    Link(Link),
    Unlink(Link),
    SelfFetch(SelfFetch),
    SelfUpdate(SelfUpdate),
    UsersFetch(UsersFetch),
    FriendsAdd(FriendIds),
    FriendsRemove(FriendIds),
    GroupsCreate(GroupsCreate),
    TopicsJoin(TopicsJoin),
    TopicsLeave(TopicsLeave),
    TopicMessageSend(TopicMessageSend),
    ChatMessage(ChatMessage),
    MatchCreate(MatchCreate),
    MatchesJoin(MatchIds),
    MatchDataSend(MatchDataSend),
    MatchesLeave(MatchIds),
    Rpc(Rpc),
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Logout(_) => "Logout",
            Message::Link(_) => "Link",
            Message::Unlink(_) => "Unlink",
            Message::SelfFetch(_) => "SelfFetch",
            Message::SelfUpdate(_) => "SelfUpdate",
            Message::UsersFetch(_) => "UsersFetch",
            Message::FriendsAdd(_) => "FriendsAdd",
            Message::FriendsRemove(_) => "FriendsRemove",
            Message::GroupsCreate(_) => "GroupsCreate",
            Message::TopicsJoin(_) => "TopicsJoin",
            Message::TopicsLeave(_) => "TopicsLeave",
            Message::TopicMessageSend(_) => "TopicMessageSend",
            Message::ChatMessage(_) => "ChatMessage",
            Message::MatchCreate(_) => "MatchCreate",
            Message::MatchesJoin(_) => "MatchesJoin",
            Message::MatchDataSend(_) => "MatchDataSend",
            Message::MatchesLeave(_) => "MatchesLeave",
            Message::Rpc(_) => "Rpc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logout {}

/// Social provider link/unlink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelfFetch {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SelfUpdate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fullname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,
    /// Opaque user metadata, base64 on the wire.
    #[serde(with = "super::b64", skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct UsersFetch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FriendIds {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GroupsCreate {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NewGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NewGroup {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub private: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
}

/// Join target. Exactly one of the three on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicJoin {
    UserId(String),
    Room(String),
    GroupId(String),
}

/// Resolved topic identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicId {
    Dm(String),
    Room(String),
    GroupId(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TopicsJoin {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<TopicJoin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TopicsLeave {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TopicMessageSend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicId>,
    /// JSON document as sent by the client; not interpreted here.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub room: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchCreate {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MatchIds {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub match_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct UserPresence {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MatchDataSend {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub match_id: String,
    /// Restrict delivery to these presences; empty means everyone in the match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presences: Vec<UserPresence>,
    #[serde(with = "super::int64", skip_serializing_if = "is_zero")]
    pub op_code: i64,
    #[serde(with = "super::b64", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Rpc {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payload: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn kind_table_matches_variants() {
        let samples = [
            Message::Logout(Logout {}),
            Message::Link(Link::default()),
            Message::Unlink(Link::default()),
            Message::SelfFetch(SelfFetch {}),
            Message::SelfUpdate(SelfUpdate::default()),
            Message::UsersFetch(UsersFetch::default()),
            Message::FriendsAdd(FriendIds::default()),
            Message::FriendsRemove(FriendIds::default()),
            Message::GroupsCreate(GroupsCreate::default()),
            Message::TopicsJoin(TopicsJoin::default()),
            Message::TopicsLeave(TopicsLeave::default()),
            Message::TopicMessageSend(TopicMessageSend::default()),
            Message::ChatMessage(ChatMessage::default()),
            Message::MatchCreate(MatchCreate {}),
            Message::MatchesJoin(MatchIds::default()),
            Message::MatchDataSend(MatchDataSend::default()),
            Message::MatchesLeave(MatchIds::default()),
            Message::Rpc(Rpc::default()),
        ];
        let kinds: Vec<&str> = samples.iter().map(Message::kind).collect();
        assert_eq!(kinds, ENVELOPE_KINDS);
    }

    #[test]
    fn wire_key_is_lower_camel_kind() {
        let v = serde_json::to_value(Message::TopicMessageSend(TopicMessageSend::default())).unwrap();
        assert!(v.get("topicMessageSend").is_some());
    }
}
