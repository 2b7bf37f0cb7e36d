use std::sync::Arc;

use dashmap::DashMap;

use super::{CallbackRegistry, HookCallback, Phase};

/// In-process registry: one map per phase, keyed by message kind.
///
/// Built once at startup and shared behind `Arc`; re-binding a kind replaces
/// the previous callback.
#[derive(Default)]
pub struct HookRegistry {
    before: DashMap<String, Arc<dyn HookCallback>>,
    after: DashMap<String, Arc<dyn HookCallback>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            before: DashMap::new(),
            after: DashMap::new(),
        }
    }

    pub fn register_before(&self, kind: impl Into<String>, cb: Arc<dyn HookCallback>) {
        self.register(Phase::Before, kind, cb);
    }

    pub fn register_after(&self, kind: impl Into<String>, cb: Arc<dyn HookCallback>) {
        self.register(Phase::After, kind, cb);
    }

    /// Bind `cb`, returning whatever was bound before.
    pub fn register(
        &self,
        phase: Phase,
        kind: impl Into<String>,
        cb: Arc<dyn HookCallback>,
    ) -> Option<Arc<dyn HookCallback>> {
        let kind = kind.into();
        tracing::debug!(phase = %phase, kind = %kind, "hook registered");
        self.map(phase).insert(kind, cb)
    }

    pub fn unregister(&self, phase: Phase, kind: &str) -> bool {
        self.map(phase).remove(kind).is_some()
    }

    fn map(&self, phase: Phase) -> &DashMap<String, Arc<dyn HookCallback>> {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
        }
    }
}

impl CallbackRegistry for HookRegistry {
    fn lookup(&self, phase: Phase, kind: &str) -> Option<Arc<dyn HookCallback>> {
        // Clone out so the shard guard is released before the callback runs.
        self.map(phase).get(kind).map(|e| Arc::clone(e.value()))
    }

    fn registered(&self) -> Vec<(Phase, String)> {
        let mut out: Vec<(Phase, String)> = self
            .before
            .iter()
            .map(|e| (Phase::Before, e.key().clone()))
            .chain(self.after.iter().map(|e| (Phase::After, e.key().clone())))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.as_str().cmp(b.0.as_str())));
        out
    }
}
