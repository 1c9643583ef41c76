//! Cooperative cancellation for a prefill run.
//!
//! Wraps `tokio_util`'s `CancellationToken`, the ecosystem's standard
//! cooperative-cancellation primitive, with an optional deadline so a
//! caller can bound a warm-up by wall-clock time without wiring up a
//! separate timer task.

use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// The cancellation context threaded through a [`crate::prefill::prefill`] call.
///
/// Cloning a `PrefillContext` shares the same underlying cancellation
/// signal — cancelling one clone cancels every clone, matching the
/// semantics of `tokio_util::sync::CancellationToken`.
#[derive(Clone, Debug)]
pub struct PrefillContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for PrefillContext {
    fn default() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }
}

impl PrefillContext {
    /// A context with no deadline that is only ever cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that reports cancelled once `deadline` has passed, in
    /// addition to responding to explicit `cancel()` calls.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Signals cancellation to this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True if this context has been cancelled explicitly or has passed its deadline.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fresh_context_is_not_cancelled() {
        assert!(!PrefillContext::new().is_cancelled());
    }

    #[test]
    fn explicit_cancel_is_observed_by_clones() {
        let ctx = PrefillContext::new();
        let clone = ctx.clone();
        ctx.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn past_deadline_reports_cancelled() {
        let ctx = PrefillContext::with_deadline(Instant::now() - Duration::from_secs(1));
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn future_deadline_does_not_report_cancelled() {
        let ctx = PrefillContext::with_deadline(Instant::now() + Duration::from_secs(60));
        assert!(!ctx.is_cancelled());
    }
}
