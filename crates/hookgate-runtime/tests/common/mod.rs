//! Helpers shared by runtime integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use hookgate_core::protocol::envelope::ChatMessage;
use hookgate_core::protocol::{Envelope, Message};
use hookgate_core::DynamicMap;
use hookgate_runtime::dispatch::HookDispatcher;
use hookgate_runtime::obs::HookMetrics;
use hookgate_runtime::registry::HookRegistry;

#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<Record>>>);

impl Captured {
    /// Install as the thread's default subscriber until the guard drops.
    pub fn install() -> (Self, DefaultGuard) {
        let cap = Captured::default();
        let subscriber = tracing_subscriber::registry().with(cap.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (cap, guard)
    }

    pub fn records(&self) -> Vec<Record> {
        self.0.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|r| r.level == Level::ERROR)
            .collect()
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.0.lock().unwrap().push(Record {
            level: *event.metadata().level(),
            fields,
        });
    }
}

pub fn dispatcher(registry: Arc<HookRegistry>) -> (Arc<HookDispatcher>, Arc<HookMetrics>) {
    let metrics = Arc::new(HookMetrics::new());
    let d = HookDispatcher::new(registry, Arc::clone(&metrics));
    (Arc::new(d), metrics)
}

pub fn chat(room: &str, text: &str) -> Envelope {
    Envelope::new(Message::ChatMessage(ChatMessage {
        room: room.into(),
        text: text.into(),
    }))
}

/// Mutable access to `map[outer][field]`.
pub fn field_mut<'a>(map: &'a mut DynamicMap, outer: &str, field: &str) -> &'a mut Value {
    map.get_mut(outer)
        .and_then(Value::as_object_mut)
        .and_then(|m| m.get_mut(field))
        .unwrap_or_else(|| panic!("missing {outer}.{field}"))
}
