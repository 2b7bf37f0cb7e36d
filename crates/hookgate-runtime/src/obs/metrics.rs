//! Minimal metrics registry for hook dispatch.
//!
//! Counter and histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Histogram buckets are fixed in microseconds to avoid floating
//! point math.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::registry::Phase;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Rows sorted by label key so output is stable between scrapes.
fn sorted_keys<V>(map: &DashMap<LabelKey, V>) -> Vec<LabelKey> {
    let mut keys: Vec<LabelKey> = map.iter().map(|r| r.key().clone()).collect();
    keys.sort();
    keys
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for key in sorted_keys(&self.map) {
            if let Some(c) = self.map.get(&key) {
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str(&key), c.load(Ordering::Relaxed));
            }
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for key in sorted_keys(&self.map) {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let n = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, n);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, hist.sum.load(Ordering::Relaxed));
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// Outcome label for a callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Ok,
    Rejected,
    Failed,
}

impl CallOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CallOutcome::Ok => "ok",
            CallOutcome::Rejected => "rejected",
            CallOutcome::Failed => "failed",
        }
    }
}

/// Hook dispatch metrics. Only recorded when a callback is bound, so the
/// `kind` label is bounded by the registry.
#[derive(Default)]
pub struct HookMetrics {
    pub invocations: CounterVec,
    pub duration: HistogramVec,
    pub after_failures: CounterVec,
}

impl HookMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_invocation(&self, phase: Phase, kind: &str, outcome: CallOutcome, took: Duration) {
        self.invocations.inc(&[
            ("phase", phase.as_str()),
            ("kind", kind),
            ("outcome", outcome.as_str()),
        ]);
        self.duration.observe(&[("phase", phase.as_str()), ("kind", kind)], took);
    }

    /// The message never reached the callback, so no duration is observed.
    pub fn record_encode_failure(&self, phase: Phase, kind: &str) {
        self.invocations.inc(&[
            ("phase", phase.as_str()),
            ("kind", kind),
            ("outcome", CallOutcome::Failed.as_str()),
        ]);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.invocations.render("hookgate_hook_invocations_total", &mut out);
        self.duration.render("hookgate_hook_duration_micros", &mut out);
        self.after_failures.render("hookgate_after_failures_total", &mut out);
        out
    }
}
