//! Request-scoped correlation identifier.
//!
//! The HTTP trace middleware opens a scope per request; errors and log lines
//! read the identifier back through [`TraceId::current`] instead of having it
//! threaded through every call. Task-locals do not follow `tokio::spawn` or
//! `spawn_blocking`, so wrap such work in [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the trace identifier on requests and responses.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use pressroom::TraceId;
///
/// async fn handler() -> String {
///     TraceId::current().map(|id| id.to_string()).unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept an identifier chosen by an upstream hop.
    ///
    /// Surrounding whitespace is ignored. The nil UUID is refused because
    /// clients that send it are not correlating anything.
    ///
    /// ```
    /// use pressroom::TraceId;
    ///
    /// assert!(TraceId::from_header(" 6f1c2a4e-8d3b-4c5a-9e7f-0a1b2c3d4e5f ").is_some());
    /// assert!(TraceId::from_header("00000000-0000-0000-0000-000000000000").is_none());
    /// assert!(TraceId::from_header("req-42").is_none());
    /// ```
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .filter(|uuid| !uuid.is_nil())
            .map(Self)
    }

    /// Returns the trace identifier in scope, if any.
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

    /// Run blocking `work` with `trace_id` in scope.
    pub fn sync_scope<F, R>(trace_id: Self, work: F) -> R
    where
        F: FnOnce() -> R,
    {
        TRACE_ID.sync_scope(trace_id, work)
    }

    /// Run `work` inside the scope of `trace_id` when one is present.
    pub fn in_optional_scope<F, R>(trace_id: Option<Self>, work: F) -> R
    where
        F: FnOnce() -> R,
    {
        match trace_id {
            Some(id) => Self::sync_scope(id, work),
            None => work(),
        }
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
