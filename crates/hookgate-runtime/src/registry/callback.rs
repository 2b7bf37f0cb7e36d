use async_trait::async_trait;
use thiserror::Error;

use hookgate_core::{DynamicMap, HookgateError};

use crate::context::SessionIdentity;

/// Why a callback did not complete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallbackFailure {
    /// The script raised or the engine failed to run it.
    #[error("{0}")]
    Script(String),
    /// The script ran and refused the message.
    #[error("{0}")]
    Rejected(String),
}

impl From<CallbackFailure> for HookgateError {
    fn from(f: CallbackFailure) -> Self {
        match f {
            CallbackFailure::Script(msg) => HookgateError::Callback(msg),
            CallbackFailure::Rejected(msg) => HookgateError::Rejected(msg),
        }
    }
}

/// A registered script function, as seen from the dispatcher.
#[async_trait]
pub trait HookCallback: Send + Sync {
    /// Run before processing. The returned map replaces the message.
    async fn invoke_before(
        &self,
        identity: &SessionIdentity,
        input: DynamicMap,
    ) -> Result<DynamicMap, CallbackFailure>;

    /// Run after processing. Any output is discarded.
    async fn invoke_after(
        &self,
        identity: &SessionIdentity,
        input: DynamicMap,
    ) -> Result<(), CallbackFailure> {
        self.invoke_before(identity, input).await.map(|_| ())
    }
}

/// Adapter for a plain function used as a before-hook.
pub struct BeforeFn<F>(F);

/// Adapter for a plain function used as an after-hook.
pub struct AfterFn<F>(F);

pub fn before_fn<F>(f: F) -> BeforeFn<F>
where
    F: Fn(&SessionIdentity, DynamicMap) -> Result<DynamicMap, CallbackFailure> + Send + Sync,
{
    BeforeFn(f)
}

pub fn after_fn<F>(f: F) -> AfterFn<F>
where
    F: Fn(&SessionIdentity, &DynamicMap) -> Result<(), CallbackFailure> + Send + Sync,
{
    AfterFn(f)
}

#[async_trait]
impl<F> HookCallback for BeforeFn<F>
where
    F: Fn(&SessionIdentity, DynamicMap) -> Result<DynamicMap, CallbackFailure> + Send + Sync,
{
    async fn invoke_before(
        &self,
        identity: &SessionIdentity,
        input: DynamicMap,
    ) -> Result<DynamicMap, CallbackFailure> {
        (self.0)(identity, input)
    }
}

#[async_trait]
impl<F> HookCallback for AfterFn<F>
where
    F: Fn(&SessionIdentity, &DynamicMap) -> Result<(), CallbackFailure> + Send + Sync,
{
    async fn invoke_before(
        &self,
        identity: &SessionIdentity,
        input: DynamicMap,
    ) -> Result<DynamicMap, CallbackFailure> {
        (self.0)(identity, &input)?;
        Ok(input)
    }

    async fn invoke_after(
        &self,
        identity: &SessionIdentity,
        input: DynamicMap,
    ) -> Result<(), CallbackFailure> {
        (self.0)(identity, &input)
    }
}
