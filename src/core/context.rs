//! Cancellation context handed to every hook.

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Reasons a [`Context`] reports that work should stop.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline ({deadline}) exceeded")]
    DeadlineExceeded { deadline: DateTime<Utc> },
}

/// Cancellation and deadline signal threaded through a trigger.
///
/// The engine never inspects it; hooks that do long or external work call
/// [`Context::check`] and fail when it reports an error.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, ContextError};
///
/// let ctx = Context::background();
/// assert!(ctx.check().is_ok());
///
/// ctx.cancellation_token().cancel();
/// assert_eq!(ctx.check(), Err(ContextError::Cancelled));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<DateTime<Utc>>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Attach an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = chrono::Duration::from_std(timeout)
            .ok()
            .and_then(|timeout| Utc::now().checked_add_signed(timeout))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.with_deadline(deadline)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Time left before the deadline; zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .signed_duration_since(Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Report whether work may continue.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Utc::now() >= deadline => {
                Err(ContextError::DeadlineExceeded { deadline })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_never_expires() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn external_token_cancels_context() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.clone());
        assert!(ctx.check().is_ok());

        token.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.check(), Err(ContextError::Cancelled));
    }

    #[test]
    fn past_deadline_is_exceeded() {
        let deadline = Utc::now() - chrono::Duration::seconds(5);
        let ctx = Context::background().with_deadline(deadline);

        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert_eq!(ctx.check(), Err(ContextError::DeadlineExceeded { deadline }));
    }

    #[test]
    fn future_timeout_leaves_time() {
        let ctx = Context::background().with_timeout(Duration::from_secs(60));
        assert!(ctx.check().is_ok());
        assert!(ctx.remaining().unwrap() > Duration::from_secs(30));
    }

    #[test]
    fn cancellation_wins_over_deadline() {
        let ctx = Context::background().with_deadline(Utc::now() - chrono::Duration::seconds(1));
        ctx.cancellation_token().cancel();
        assert_eq!(ctx.check(), Err(ContextError::Cancelled));
    }
}
