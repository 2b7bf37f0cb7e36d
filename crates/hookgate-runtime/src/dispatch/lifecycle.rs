//! One message's trip through the hooks:
//! `Received -> BeforeHook -> Processed -> AfterHook -> Done`, or `Rejected`
//! when the before-hook (or processing) fails.

use std::sync::Arc;

use async_trait::async_trait;

use hookgate_core::error::{HookgateError, Result};
use hookgate_core::protocol::Envelope;

use super::HookDispatcher;
use crate::config::AfterMode;
use crate::context::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Received,
    BeforeHook,
    Processed,
    AfterHook,
    Done,
    Rejected,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Received => "received",
            LifecycleState::BeforeHook => "before_hook",
            LifecycleState::Processed => "processed",
            LifecycleState::AfterHook => "after_hook",
            LifecycleState::Done => "done",
            LifecycleState::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Done | LifecycleState::Rejected)
    }

    /// Legal single-step transitions.
    pub fn can_advance(self, to: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, to),
            (Received, BeforeHook)
                | (BeforeHook, Processed)
                | (BeforeHook, Rejected)
                | (Processed, AfterHook)
                | (AfterHook, Done)
        )
    }
}

/// The caller's own handling of a message, run between the two hooks.
#[async_trait]
pub trait MessageProcessor: Send + Sync {
    /// Handle the authoritative envelope. The returned envelope is what the
    /// after-hook observes.
    async fn process(&self, envelope: Envelope) -> Result<Envelope>;
}

/// Terminal result of [`Pipeline::run`].
#[derive(Debug)]
pub enum Outcome {
    Done(Envelope),
    Rejected(HookgateError),
}

impl Outcome {
    pub fn state(&self) -> LifecycleState {
        match self {
            Outcome::Done(_) => LifecycleState::Done,
            Outcome::Rejected(_) => LifecycleState::Rejected,
        }
    }
}

struct Tracker<'a> {
    kind: &'a str,
    state: LifecycleState,
}

impl<'a> Tracker<'a> {
    fn new(kind: &'a str) -> Self {
        Self {
            kind,
            state: LifecycleState::Received,
        }
    }

    fn advance(&mut self, to: LifecycleState) {
        debug_assert!(self.state.can_advance(to), "{:?} -> {:?}", self.state, to);
        tracing::debug!(kind = %self.kind, from = self.state.as_str(), to = to.as_str(), "message lifecycle");
        self.state = to;
    }
}

/// Wraps a processing step with the before and after hooks for its kind.
pub struct Pipeline {
    dispatcher: Arc<HookDispatcher>,
    after_mode: AfterMode,
}

impl Pipeline {
    pub fn new(dispatcher: Arc<HookDispatcher>, after_mode: AfterMode) -> Self {
        Self {
            dispatcher,
            after_mode,
        }
    }

    pub fn after_mode(&self) -> AfterMode {
        self.after_mode
    }

    pub async fn run(
        &self,
        kind: &str,
        envelope: Envelope,
        session: Option<&dyn Session>,
        processor: &dyn MessageProcessor,
    ) -> Outcome {
        let mut lc = Tracker::new(kind);

        lc.advance(LifecycleState::BeforeHook);
        let envelope = match self.dispatcher.invoke_before(kind, envelope, session).await {
            Ok(envelope) => envelope,
            Err(e) => {
                lc.advance(LifecycleState::Rejected);
                return Outcome::Rejected(e);
            }
        };

        let processed = match processor.process(envelope).await {
            Ok(processed) => processed,
            Err(e) => {
                lc.advance(LifecycleState::Rejected);
                return Outcome::Rejected(e);
            }
        };
        lc.advance(LifecycleState::Processed);

        lc.advance(LifecycleState::AfterHook);
        match self.after_mode {
            AfterMode::Inline => {
                self.dispatcher.invoke_after(kind, &processed, session).await;
            }
            AfterMode::Detached => {
                // Fire and forget; the handle is not awaited.
                let _ = self
                    .dispatcher
                    .spawn_after(kind, processed.clone(), session);
            }
        }
        lc.advance(LifecycleState::Done);

        Outcome::Done(processed)
    }
}
