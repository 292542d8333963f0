//! Request-scoped trace identifier.
//!
//! The identifier lives in tokio task-local storage for the lifetime of one
//! request. Errors built while it is in scope copy it into their payload, and
//! the trace middleware echoes it in the `trace-id` response header. A caller
//! or proxy may supply its own identifier in the request header; anything
//! that is not a UUID is replaced by a fresh one.
//!
//! Task-locals are not inherited by spawned tasks; wrap spawned work in
//! [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use logbook::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id = TraceId::adopt_or_generate(Some("5f0c6a8e-3d1b-4c8e-9a55-2f1d7e0b9c41"));
/// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an inbound identifier when it parses, otherwise generate one.
    #[must_use]
    pub fn adopt_or_generate(inbound: Option<&str>) -> Self {
        inbound
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
