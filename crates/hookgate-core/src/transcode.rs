//! Structured transcoder: typed message <-> dynamic map.
//!
//! The dynamic side is a plain `serde_json` object, i.e. the tagged union
//! `{Null, Bool, Number, String, Array, Object}`. It is the only shape a
//! scripted callback ever sees or returns.
//!
//! Rules:
//! - Encoding emits canonical wire names and omits empty fields. Object keys
//!   are sorted, so the same message always yields the same map.
//! - Decoding is strict about shape (unknown keys, wrong types, zero or several
//!   payload keys are errors) and lenient about absence: missing fields and
//!   fields set to `null` take their defaults, so partial rewrites are valid.
//! - Decoding targets a kind: a callback that hands back a different message
//!   kind than it was given is a decode error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HookgateError, Result};
use crate::protocol::{AuthId, AuthenticateRequest, Envelope, Message};

/// Dynamic representation handed to and received from callbacks.
pub type DynamicMap = Map<String, Value>;

const CID: &str = "cid";

/// A one-of wire message that hooks can intercept.
pub trait Transcode: Sized {
    /// Kind of the active payload.
    fn kind(&self) -> &'static str;

    fn encode(&self) -> Result<DynamicMap>;

    /// Rebuild a message from `map`, requiring its kind to be `target_kind`.
    fn decode(map: DynamicMap, target_kind: &str) -> Result<Self>;
}

impl Transcode for Envelope {
    fn kind(&self) -> &'static str {
        self.message.kind()
    }

    fn encode(&self) -> Result<DynamicMap> {
        encode_one_of(self.cid.as_deref(), &self.message)
    }

    fn decode(map: DynamicMap, target_kind: &str) -> Result<Self> {
        let (cid, message) = decode_one_of::<Message>(map)?;
        check_kind(message.kind(), target_kind)?;
        Ok(Envelope { cid, message })
    }
}

impl Transcode for AuthenticateRequest {
    fn kind(&self) -> &'static str {
        self.id.kind()
    }

    fn encode(&self) -> Result<DynamicMap> {
        encode_one_of(self.cid.as_deref(), &self.id)
    }

    fn decode(map: DynamicMap, target_kind: &str) -> Result<Self> {
        let (cid, id) = decode_one_of::<AuthId>(map)?;
        check_kind(id.kind(), target_kind)?;
        Ok(AuthenticateRequest { cid, id })
    }
}

fn encode_one_of<P: Serialize>(cid: Option<&str>, payload: &P) -> Result<DynamicMap> {
    let value = serde_json::to_value(payload).map_err(|e| HookgateError::Encode(e.to_string()))?;
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(HookgateError::Encode(format!(
                "payload encoded to {}, expected object",
                json_type(&other)
            )))
        }
    };
    if let Some(cid) = cid {
        map.insert(CID.to_string(), Value::String(cid.to_string()));
    }
    Ok(map)
}

fn decode_one_of<P: DeserializeOwned>(mut map: DynamicMap) -> Result<(Option<String>, P)> {
    let cid = match map.remove(CID) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            return Err(HookgateError::Decode(format!(
                "cid must be a string, got {}",
                json_type(&other)
            )))
        }
    };

    map.retain(|_, v| !v.is_null());
    for v in map.values_mut() {
        prune_nulls(v);
    }

    match map.len() {
        1 => {}
        0 => return Err(HookgateError::Decode("no message payload present".into())),
        _ => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            return Err(HookgateError::Decode(format!(
                "expected exactly one message payload, found: {}",
                keys.join(", ")
            )));
        }
    }

    let payload = serde_json::from_value(Value::Object(map))
        .map_err(|e| HookgateError::Decode(e.to_string()))?;
    Ok((cid, payload))
}

/// Drop `null` object members at every depth. Array elements are kept, so a
/// `null` inside a list still fails to decode.
fn prune_nulls(v: &mut Value) {
    match v {
        Value::Object(m) => {
            m.retain(|_, member| !member.is_null());
            m.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}

fn check_kind(found: &str, target: &str) -> Result<()> {
    if found != target {
        return Err(HookgateError::Decode(format!(
            "expected {target} message, got {found}"
        )));
    }
    Ok(())
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
