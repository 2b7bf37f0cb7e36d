use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use uuid::Uuid;

use hookgate_core::error::Result;
use hookgate_core::protocol::{AuthenticateRequest, Envelope};
use hookgate_core::transcode::Transcode;

use crate::context::{Session, SessionIdentity};
use crate::obs::metrics::CallOutcome;
use crate::obs::{FailureReporter, FailureStage, HookMetrics};
use crate::registry::{CallbackFailure, CallbackRegistry, HookCallback, Phase};

/// Runs before/after callbacks around a message.
///
/// Before-hooks sit on the request path: every failure comes back as `Err`
/// and the message must be dropped. After-hooks are observers: they return
/// nothing and their failures only reach the log.
pub struct HookDispatcher {
    registry: Arc<dyn CallbackRegistry>,
    metrics: Arc<HookMetrics>,
    reporter: FailureReporter,
}

impl HookDispatcher {
    pub fn new(registry: Arc<dyn CallbackRegistry>, metrics: Arc<HookMetrics>) -> Self {
        let reporter = FailureReporter::new(Arc::clone(&metrics));
        Self {
            registry,
            metrics,
            reporter,
        }
    }

    /// Run the before-hook bound to `kind`.
    ///
    /// Returns the envelope to use from here on: the input itself when nothing
    /// is bound, otherwise the callback's rewrite, which must keep the
    /// envelope's message kind.
    pub async fn invoke_before(
        &self,
        kind: &str,
        envelope: Envelope,
        session: Option<&dyn Session>,
    ) -> Result<Envelope> {
        let Some(cb) = self.registry.lookup(Phase::Before, kind) else {
            return Ok(envelope);
        };
        let identity = SessionIdentity::extract(session);
        self.run_before(cb, kind, envelope, &identity).await
    }

    /// Run the after-hook bound to `kind`. Never fails.
    pub async fn invoke_after(&self, kind: &str, envelope: &Envelope, session: Option<&dyn Session>) {
        let Some(cb) = self.registry.lookup(Phase::After, kind) else {
            return;
        };
        let identity = SessionIdentity::extract(session);
        self.run_after(cb, kind, envelope, &identity).await;
    }

    /// Same as [`invoke_after`](Self::invoke_after) on a detached task.
    ///
    /// The identity is captured now, so later handle changes are not seen.
    /// Returns `None` when nothing is bound.
    pub fn spawn_after(
        self: &Arc<Self>,
        kind: &str,
        envelope: Envelope,
        session: Option<&dyn Session>,
    ) -> Option<JoinHandle<()>> {
        let cb = self.registry.lookup(Phase::After, kind)?;
        let identity = SessionIdentity::extract(session);
        let this = Arc::clone(self);
        let kind = kind.to_string();
        Some(tokio::spawn(async move {
            this.run_after(cb, &kind, &envelope, &identity).await;
        }))
    }

    /// Before-hook for an authentication request. Kind comes from the
    /// credential variant; the identity is always anonymous.
    pub async fn invoke_before_authentication(
        &self,
        request: AuthenticateRequest,
    ) -> Result<AuthenticateRequest> {
        let kind = request.kind();
        let Some(cb) = self.registry.lookup(Phase::Before, kind) else {
            return Ok(request);
        };
        self.run_before(cb, kind, request, &SessionIdentity::anonymous())
            .await
    }

    /// After-hook for an authentication request, with the identity the
    /// authentication just produced.
    pub async fn invoke_after_authentication(
        &self,
        request: &AuthenticateRequest,
        user_id: Uuid,
        handle: &str,
        expiry: i64,
    ) {
        let kind = request.kind();
        let Some(cb) = self.registry.lookup(Phase::After, kind) else {
            return;
        };
        let identity = SessionIdentity::new(user_id, handle, expiry);
        self.run_after(cb, kind, request, &identity).await;
    }

    async fn run_before<T: Transcode>(
        &self,
        cb: Arc<dyn HookCallback>,
        kind: &str,
        msg: T,
        identity: &SessionIdentity,
    ) -> Result<T> {
        let target = msg.kind();
        let input = match msg.encode() {
            Ok(input) => input,
            Err(e) => {
                self.metrics.record_encode_failure(Phase::Before, kind);
                tracing::debug!(kind = %kind, error = %e, "message could not be handed to before hook");
                return Err(e);
            }
        };
        drop(msg);

        let started = Instant::now();
        let res = cb.invoke_before(identity, input).await;
        let took = started.elapsed();

        let output = match res {
            Ok(output) => output,
            Err(failure) => {
                let outcome = match failure {
                    CallbackFailure::Rejected(_) => CallOutcome::Rejected,
                    CallbackFailure::Script(_) => CallOutcome::Failed,
                };
                self.metrics.record_invocation(Phase::Before, kind, outcome, took);
                tracing::debug!(kind = %kind, error = %failure, "before hook refused message");
                return Err(failure.into());
            }
        };

        match T::decode(output, target) {
            Ok(rewritten) => {
                self.metrics
                    .record_invocation(Phase::Before, kind, CallOutcome::Ok, took);
                tracing::trace!(kind = %kind, anonymous = identity.is_anonymous(), "before hook applied");
                Ok(rewritten)
            }
            Err(e) => {
                self.metrics
                    .record_invocation(Phase::Before, kind, CallOutcome::Failed, took);
                tracing::debug!(kind = %kind, error = %e, "before hook returned an invalid message");
                Err(e)
            }
        }
    }

    async fn run_after<T: Transcode>(
        &self,
        cb: Arc<dyn HookCallback>,
        kind: &str,
        msg: &T,
        identity: &SessionIdentity,
    ) {
        let input = match msg.encode() {
            Ok(input) => input,
            Err(e) => {
                self.reporter.after_hook_failed(kind, FailureStage::Encode, &e);
                return;
            }
        };

        let started = Instant::now();
        let res = cb.invoke_after(identity, input).await;
        let took = started.elapsed();

        match res {
            Ok(()) => {
                self.metrics
                    .record_invocation(Phase::After, kind, CallOutcome::Ok, took);
                tracing::trace!(kind = %kind, anonymous = identity.is_anonymous(), "after hook ran");
            }
            Err(failure) => {
                self.metrics
                    .record_invocation(Phase::After, kind, CallOutcome::Failed, took);
                self.reporter
                    .after_hook_failed(kind, FailureStage::Callback, &failure);
            }
        }
    }
}
