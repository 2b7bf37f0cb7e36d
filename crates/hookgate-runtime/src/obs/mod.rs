//! Observability: in-process hook metrics and the after-hook failure reporter.
//!
//! Metrics are stored as atomics and rendered in Prometheus text format by
//! whoever embeds the runtime. Failures are reported through `tracing`.

pub mod metrics;
pub mod report;

pub use metrics::HookMetrics;
pub use report::{FailureReporter, FailureStage};
