//! Request-scoped correlation identifier.
//!
//! The identifier lives in Tokio task-local storage so errors and log lines
//! can pick it up without threading it through every call. Task locals do not
//! follow work onto other tasks or blocking threads; use [`TraceId::scope`] or
//! [`TraceId::spawn_blocking`] when handing work off.

use std::future::Future;

use tokio::task::JoinError;
use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use clinic_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier bound to the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` bound.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Run CPU-bound work on the blocking pool, keeping the current
    /// identifier visible to it.
    pub async fn spawn_blocking<F, T>(work: F) -> Result<T, JoinError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match Self::current() {
            Some(id) => {
                tokio::task::spawn_blocking(move || TRACE_ID.sync_scope(id, work)).await
            }
            None => tokio::task::spawn_blocking(work).await,
        }
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unbound_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn scope_binds_identifier() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    }

    #[tokio::test]
    async fn blocking_work_sees_identifier() {
        let id = TraceId::generate();
        let seen = TraceId::scope(id, TraceId::spawn_blocking(TraceId::current))
            .await
            .expect("blocking task completes");
        assert_eq!(seen, Some(id));
    }

    #[test]
    fn rejects_non_uuid_text() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }
}
