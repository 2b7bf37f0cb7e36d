//! After-hook failure reporting.
//!
//! After-hooks run once the message is already handled, so nothing they do
//! may reach the caller. Every failure ends here instead: one `ERROR` record
//! and one counter increment per failed call.

use std::fmt;
use std::sync::Arc;

use super::metrics::HookMetrics;
use crate::registry::Phase;

/// Where in the after-hook call the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Encode,
    Callback,
}

impl FailureStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStage::Encode => "encode",
            FailureStage::Callback => "callback",
        }
    }
}

#[derive(Clone)]
pub struct FailureReporter {
    metrics: Arc<HookMetrics>,
}

impl FailureReporter {
    pub fn new(metrics: Arc<HookMetrics>) -> Self {
        Self { metrics }
    }

    pub fn after_hook_failed(&self, kind: &str, stage: FailureStage, cause: &dyn fmt::Display) {
        self.metrics
            .after_failures
            .inc(&[("kind", kind), ("stage", stage.as_str())]);

        tracing::error!(
            message_kind = %kind,
            phase = %Phase::After,
            stage = stage.as_str(),
            cause = %cause,
            "runtime after hook failed"
        );
    }
}
