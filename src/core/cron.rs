//! # Cron: periodic execution of a single job.
//!
//! [`Cron`] is a [`Process`] calling a [`CronJob`] once right away and then on
//! every tick of a [`Ticker`]. The ticker comes from a [`TickerFactory`], so
//! tests drive the runner with [`ManualTickerFactory`](crate::ManualTickerFactory)
//! instead of real time.
//!
//! ## Lifecycle
//! ```text
//! run()
//!   ├─► ticker = factory.create(period)
//!   ├─► job.begin(period) ──Err──► return Err
//!   ├─► job.exec()        ──Err──► return Err
//!   └─► loop {
//!         select {
//!           stop()      ─► return Ok
//!           ticker.tick ─► job.exec() ──Err──► return Err
//!         }
//!       }
//!
//! on every exit: job.end(), then ticker.stop()
//! ```
//!
//! ## Rules
//! - Job errors are not retried; they end `run` and reach the owning group.
//! - `end` also fires when the `run` future is dropped mid-flight.
//! - When stop and a tick are both pending, stop wins.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::job::{CronJob, Exec};
use crate::error::Exit;
use crate::process::Process;
use crate::ticker::{IntervalTickerFactory, Ticker, TickerFactory};

/// Runs a [`CronJob`] every `period` until stopped or until the job fails.
pub struct Cron {
    name: Cow<'static, str>,
    period: Duration,
    job: Arc<dyn CronJob>,
    done: CancellationToken,
    ticker_factory: Arc<dyn TickerFactory>,
}

impl Cron {
    /// Creates a runner ticking on the wall clock.
    pub fn new(job: impl CronJob, period: Duration) -> Self {
        Self::from_arc(Arc::new(job), period)
    }

    /// Creates a runner for a job shared with other owners.
    pub fn from_arc(job: Arc<dyn CronJob>, period: Duration) -> Self {
        Self {
            name: Cow::Borrowed("cron"),
            period,
            job,
            done: CancellationToken::new(),
            ticker_factory: Arc::new(IntervalTickerFactory::new()),
        }
    }

    /// Replaces the source of periodic wake-ups.
    pub fn with_ticker_factory(mut self, factory: Arc<dyn TickerFactory>) -> Self {
        self.ticker_factory = factory;
        self
    }

    /// Sets the process name reported to the group.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Time between two ticks.
    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Stops the ticker when `run` exits.
struct TickerGuard(Box<dyn Ticker>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Calls [`CronJob::end`] when `run` exits.
struct EndGuard<'a>(&'a dyn CronJob);

impl Drop for EndGuard<'_> {
    fn drop(&mut self) {
        self.0.end();
    }
}

#[async_trait]
impl Process for Cron {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), Exit> {
        // Declared first, dropped last: `end` runs before the ticker is released.
        let mut ticker = TickerGuard(self.ticker_factory.create(self.period));
        let _end = EndGuard(self.job.as_ref());

        self.job.begin(self.period).await?;
        self.job.exec().await?;

        loop {
            tokio::select! {
                biased;
                _ = self.done.cancelled() => return Ok(()),
                tick = ticker.0.tick() => match tick {
                    Some(_) => self.job.exec().await?,
                    None => {
                        self.done.cancelled().await;
                        return Ok(());
                    }
                },
            }
        }
    }

    fn stop(&self) {
        self.done.cancel();
    }
}
