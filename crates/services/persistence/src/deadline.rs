//! Per-call deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{StoreError, StoreResult};

/// A caller's request-scoped deadline, or none.
///
/// Operations combine it with their own per-call timeout and run under the
/// earlier of the two. There is no cancel-on-demand; expiry is the only
/// cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No caller deadline; only the operation timeout applies.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// Deadline `budget` from now.
    pub fn within(budget: Duration) -> Self {
        Self(Some(Instant::now() + budget))
    }

    pub fn instant(&self) -> Option<Instant> {
        self.0
    }

    /// Effective deadline for a call entered now with the given timeout.
    pub fn bounded_by(&self, operation_timeout: Duration) -> Instant {
        let own = Instant::now() + operation_timeout;
        match self.0 {
            Some(caller) if caller < own => caller,
            _ => own,
        }
    }
}

/// Run one store call under `deadline`, logging any failure.
pub(crate) async fn run_until<T, F>(operation: &str, deadline: Instant, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    let outcome = match tokio::time::timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout),
    };

    if let Err(err) = &outcome {
        err.trace(operation);
    }

    outcome
}
