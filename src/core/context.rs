use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::core::library::{LibraryError, LibraryResult};

/// Per-request cancellation scope handed from the adapter down to the service.
///
/// Cancelling the token, or reaching the deadline, makes every pending
/// [`Context::run`] return [`LibraryError::Cancelled`]. The wrapped future is
/// dropped at that point, which aborts an in-flight DynamoDB call or a lock wait.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<T, F>(&self, operation: &str, fut: F) -> LibraryResult<T>
        where F: Future<Output=LibraryResult<T>> {
        if self.is_cancelled() {
            return Err(LibraryError::cancelled(format!("{} cancelled", operation).as_str()));
        }
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => {
                        Err(LibraryError::cancelled(format!("{} cancelled", operation).as_str()))
                    }
                    res = tokio::time::timeout_at(deadline, fut) => {
                        res.unwrap_or_else(|_| Err(LibraryError::cancelled(
                            format!("{} deadline exceeded", operation).as_str())))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => {
                        Err(LibraryError::cancelled(format!("{} cancelled", operation).as_str()))
                    }
                    res = fut => res,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use crate::core::context::Context;
    use crate::core::library::{LibraryError, LibraryResult};

    #[tokio::test]
    async fn test_should_pass_through_result() {
        let ctx = Context::background();
        let res = ctx.run("op", async { Ok::<_, LibraryError>(7) }).await.expect("should run");
        assert_eq!(7, res);

        let res: LibraryResult<()> = ctx.run("op", async { Err(LibraryError::not_found("missing")) }).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_fail_when_already_cancelled() {
        let ctx = Context::background();
        ctx.cancel();
        assert!(ctx.is_cancelled());
        let res = ctx.run("op", async { Ok::<_, LibraryError>(()) }).await;
        assert!(matches!(res, Err(LibraryError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_should_abort_pending_future_on_cancel() {
        let ctx = Context::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });
        let res: LibraryResult<()> = ctx.run("op", std::future::pending()).await;
        assert!(matches!(res, Err(LibraryError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_should_abort_pending_future_on_deadline() {
        let ctx = Context::with_timeout(Duration::from_millis(20));
        let res: LibraryResult<()> = ctx.run("op", std::future::pending()).await;
        let err = res.expect_err("should time out");
        assert!(matches!(err, LibraryError::Cancelled { .. }));
        assert!(err.message().contains("deadline exceeded"));
    }
}
