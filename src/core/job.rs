//! # Cron job contracts and helpers.
//!
//! - [`Exec`] one unit of periodic work
//! - [`CronJob`] an [`Exec`] with `begin` / `end` lifecycle hooks
//! - [`LoggedJob`] decorator turning any [`Exec`] into a logging [`CronJob`]
//! - [`ExecFn`] closure-backed [`Exec`]
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use procgroup::{Cron, ExecFn, LoggedJob, ProcessError};
//! use procgroup::logging::NullLogger;
//!
//! let job = LoggedJob::new(
//!     "cleanup",
//!     ExecFn::new(|| async { Ok::<(), ProcessError>(()) }),
//!     Arc::new(NullLogger),
//! );
//! let cron = Cron::new(job, Duration::from_secs(60));
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProcessError;
use crate::logging::Logger;

/// Unit of work run on every cron wake-up.
#[async_trait]
pub trait Exec: Send + Sync + 'static {
    async fn exec(&self) -> Result<(), ProcessError>;
}

/// Periodic job driven by [`Cron`](crate::Cron).
#[async_trait]
pub trait CronJob: Exec {
    /// Called once before the first `exec`.
    async fn begin(&self, period: Duration) -> Result<(), ProcessError>;

    /// Called exactly once when the cron run ends, whatever the cause.
    fn end(&self);
}

/// Decorator adding lifecycle and failure logging to an [`Exec`].
pub struct LoggedJob<E> {
    name: Cow<'static, str>,
    job: E,
    logger: Arc<dyn Logger>,
}

impl<E: Exec> LoggedJob<E> {
    /// Wraps `job`, logging under `name`.
    pub fn new(name: impl Into<Cow<'static, str>>, job: E, logger: Arc<dyn Logger>) -> Self {
        Self {
            name: name.into(),
            job,
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl<E: Exec> Exec for LoggedJob<E> {
    async fn exec(&self) -> Result<(), ProcessError> {
        let res = self.job.exec().await;
        if let Err(err) = &res {
            self.logger
                .error(format_args!("cron job {} failed: {err}", self.name));
        }
        res
    }
}

#[async_trait]
impl<E: Exec> CronJob for LoggedJob<E> {
    async fn begin(&self, period: Duration) -> Result<(), ProcessError> {
        self.logger
            .info(format_args!("cron job {} start period={period:?}", self.name));
        Ok(())
    }

    fn end(&self) {
        self.logger
            .info(format_args!("cron job {} shutdown", self.name));
    }
}

/// Function-backed [`Exec`]; each call builds a fresh future.
#[derive(Debug)]
pub struct ExecFn<F> {
    f: F,
}

impl<F> ExecFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Exec for ExecFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ProcessError>> + Send + 'static,
{
    async fn exec(&self) -> Result<(), ProcessError> {
        (self.f)().await
    }
}
