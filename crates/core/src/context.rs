//! Per-request cancellation carrier.
//!
//! Every repository call takes a [`RequestContext`]. The HTTP layer derives
//! one per request from the server-wide shutdown token, so stopping the
//! server aborts in-flight store operations.

use std::future::Future;

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
}

impl RequestContext {
    /// A root context that is only canceled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context canceled when `parent` is canceled (or when canceled itself).
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Drive `fut` to completion unless this context is canceled first.
    ///
    /// Returns [`CoreError::Canceled`] tagged with `operation` as soon as the
    /// cancellation fires; `fut` is dropped at that point.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.is_cancelled() {
            return Err(CoreError::Canceled { operation });
        }

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(CoreError::Canceled { operation }),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn run_returns_result_when_not_canceled() {
        let ctx = RequestContext::new();
        let out = ctx.run("op", async { Ok::<_, CoreError>(42) }).await;
        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn run_short_circuits_when_already_canceled() {
        let ctx = RequestContext::new();
        ctx.cancel();
        let out = ctx
            .run("list reports", async { Ok::<_, CoreError>(()) })
            .await;
        assert_matches!(out, Err(CoreError::Canceled { operation: "list reports" }));
    }

    #[tokio::test]
    async fn run_aborts_pending_future_on_parent_cancel() {
        let root = CancellationToken::new();
        let ctx = RequestContext::child_of(&root);

        let canceler = {
            let root = root.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                root.cancel();
            })
        };

        let started = tokio::time::Instant::now();
        let out = ctx
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, CoreError>(())
            })
            .await;

        assert_matches!(out, Err(CoreError::Canceled { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
        canceler.await.unwrap();
    }

    #[test]
    fn canceling_child_leaves_parent_alive() {
        let root = CancellationToken::new();
        let ctx = RequestContext::child_of(&root);
        ctx.cancel();
        assert!(ctx.is_cancelled());
        assert!(!root.is_cancelled());
    }
}
