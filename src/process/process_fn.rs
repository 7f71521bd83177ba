//! # Function-backed process (`ProcessFn`)
//!
//! [`ProcessFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`. Every call to
//! `run` builds a fresh future from the closure; [`Process::stop`] cancels the
//! token handed to it.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use procgroup::{Exit, Process, ProcessFn, ProcessRef};
//!
//! let p: ProcessRef = ProcessFn::arc("worker", |ctx: CancellationToken| async move {
//!     ctx.cancelled().await;
//!     Ok::<_, Exit>(())
//! });
//!
//! assert_eq!(p.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Exit;
use crate::process::Process;

/// Function-backed process implementation.
///
/// Once stopped, the token stays cancelled: a later `run` sees it cancelled
/// from the start.
#[derive(Debug)]
pub struct ProcessFn<F> {
    name: Cow<'static, str>,
    token: CancellationToken,
    f: F,
}

impl<F> ProcessFn<F> {
    /// Creates a new function-backed process.
    ///
    /// Prefer [`ProcessFn::arc`] when you immediately need a [`ProcessRef`](crate::ProcessRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            token: CancellationToken::new(),
            f,
        }
    }

    /// Creates the process and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }

    /// True once [`Process::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[async_trait]
impl<F, Fut> Process for ProcessFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Exit>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), Exit> {
        (self.f)(self.token.clone()).await
    }

    fn stop(&self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessError;

    #[tokio::test]
    async fn test_stop_cancels_running_closure() {
        let p = ProcessFn::arc("loop", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Ok::<(), Exit>(())
        });

        let runner = {
            let p = Arc::clone(&p);
            tokio::spawn(async move { p.run().await })
        };

        p.stop();
        p.stop();
        assert!(p.is_stopped());
        assert_eq!(runner.await.expect("join"), Ok(()));
    }

    #[tokio::test]
    async fn test_closure_error_is_returned() {
        let p = ProcessFn::new("bad", |_ctx: CancellationToken| async {
            Err::<(), Exit>(Exit::Failed(ProcessError::fail("boom")))
        });
        assert_eq!(p.run().await, Err(Exit::Failed(ProcessError::fail("boom"))));
    }
}
