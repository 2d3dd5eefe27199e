//! Asynchronous side effects that may yield one message.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Why an effect produced no message.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("effect failed: {0:#}")]
    Failed(anyhow::Error),

    #[error("effect timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<anyhow::Error> for EffectError {
    fn from(err: anyhow::Error) -> Self {
        EffectError::Failed(err)
    }
}

type EffectFuture<M> = Pin<Box<dyn Future<Output = Result<Option<M>, EffectError>>>>;

/// Fire-and-forget asynchronous work returned from `init` or `update`.
///
/// The owning instance runs it as a local task; a `Some(message)` result is
/// sent back through the instance, `None` is dropped, and a failure is offered
/// to [`crate::Component::effect_failed`].
pub struct Effect<M> {
    future: EffectFuture<M>,
}

impl<M: 'static> Effect<M> {
    /// Effect that cannot fail.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Option<M>> + 'static,
    {
        Self {
            future: Box::pin(async move { Ok(future.await) }),
        }
    }

    /// Effect whose error is surfaced through `effect_failed`.
    pub fn try_new<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<Option<M>, E>> + 'static,
        E: Into<anyhow::Error>,
    {
        Self {
            future: Box::pin(async move { future.await.map_err(|err| EffectError::Failed(err.into())) }),
        }
    }

    /// Deliver `message` on a later turn.
    pub fn message(message: M) -> Self {
        Self::new(async move { Some(message) })
    }

    /// Deliver `message` once `delay` has elapsed.
    pub fn after(delay: Duration, message: M) -> Self {
        Self::new(async move {
            tokio::time::sleep(delay).await;
            Some(message)
        })
    }

    /// Fail with [`EffectError::TimedOut`] if the effect runs longer than `limit`.
    pub fn timeout(self, limit: Duration) -> Self {
        let future = self.future;
        Self {
            future: Box::pin(async move {
                match tokio::time::timeout(limit, future).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(EffectError::TimedOut(limit)),
                }
            }),
        }
    }

    /// Convert the produced message, e.g. to embed a child's effect in a parent.
    pub fn map<N, F>(self, f: F) -> Effect<N>
    where
        N: 'static,
        F: FnOnce(M) -> N + 'static,
    {
        let future = self.future;
        Effect {
            future: Box::pin(async move { future.await.map(|message| message.map(f)) }),
        }
    }

    pub(crate) async fn run(self) -> Result<Option<M>, EffectError> {
        self.future.await
    }
}

impl<M> fmt::Debug for Effect<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").finish_non_exhaustive()
    }
}
