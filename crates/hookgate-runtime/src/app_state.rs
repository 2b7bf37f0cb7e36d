//! Shared application state for the hook runtime.
//!
//! Wires config, metrics, the dispatcher and the lifecycle pipeline around a
//! caller-supplied registry. Startup problems come back as `Result`.

use std::sync::Arc;

use hookgate_core::error::{HookgateError, Result};
use hookgate_core::protocol::{AUTH_KINDS, ENVELOPE_KINDS};

use crate::config::HookgateConfig;
use crate::dispatch::{HookDispatcher, Pipeline};
use crate::obs::HookMetrics;
use crate::registry::{CallbackRegistry, Phase};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<HookgateConfig>,
    metrics: Arc<HookMetrics>,
    dispatcher: Arc<HookDispatcher>,
    pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so the embedder can handle errors gracefully (no panic).
    pub fn new(cfg: HookgateConfig, registry: Arc<dyn CallbackRegistry>) -> Result<Self> {
        cfg.validate()?;

        // registry <-> schema sanity check
        let bound = registry.registered();
        for (phase, kind) in &bound {
            if is_known_kind(kind) {
                continue;
            }
            tracing::warn!(phase = %phase, kind = %kind, "hook bound to a kind no message carries");
            if cfg.dispatch.fail_on_unknown_kind {
                return Err(HookgateError::BadRequest(format!(
                    "{phase} hook bound to unknown message kind: {kind}"
                )));
            }
        }

        let before = bound.iter().filter(|(p, _)| *p == Phase::Before).count();
        tracing::info!(
            before_hooks = before,
            after_hooks = bound.len() - before,
            after_mode = ?cfg.dispatch.after_mode,
            "hook runtime ready"
        );

        let metrics = Arc::new(HookMetrics::new());
        let dispatcher = Arc::new(HookDispatcher::new(registry, Arc::clone(&metrics)));
        let pipeline = Arc::new(Pipeline::new(
            Arc::clone(&dispatcher),
            cfg.dispatch.after_mode,
        ));

        Ok(Self {
            cfg: Arc::new(cfg),
            metrics,
            dispatcher,
            pipeline,
        })
    }

    pub fn cfg(&self) -> &HookgateConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> Arc<HookMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn dispatcher(&self) -> Arc<HookDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn pipeline(&self) -> Arc<Pipeline> {
        Arc::clone(&self.pipeline)
    }
}

fn is_known_kind(kind: &str) -> bool {
    ENVELOPE_KINDS.contains(&kind) || AUTH_KINDS.contains(&kind)
}
