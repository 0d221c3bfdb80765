//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error responses read it so the body's
//! `trace_id` matches the `x-trace-id` header. Outside a scope the id is
//! `"unknown"`.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current task's trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Synchronous counterpart of [`with_trace_id`], for work done before a
/// future exists (middleware `call`).
pub fn sync_with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_id_scoping() {
        assert_eq!(trace_id(), "unknown");

        let seen = with_trace_id("trace-abc".to_string(), async { trace_id() }).await;
        assert_eq!(seen, "trace-abc");

        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn test_inner_scope_shadows_outer() {
        let (inner, outer_after) = with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            (inner, trace_id())
        })
        .await;

        assert_eq!(inner, "inner");
        assert_eq!(outer_after, "outer");
    }

    #[test]
    fn test_sync_scope() {
        let seen = sync_with_trace_id("sync-1".to_string(), trace_id);
        assert_eq!(seen, "sync-1");
        assert_eq!(trace_id(), "unknown");
    }
}
