//! # Periodic wake-up sources.
//!
//! [`Cron`](crate::Cron) never reads the clock directly: it asks a
//! [`TickerFactory`] for a [`Ticker`] and waits on it. Swapping the factory
//! lets tests inject ticks deterministically instead of waiting for real time.
//!
//! ## Contents
//! - [`Ticker`] / [`TickerFactory`] the abstraction
//! - [`IntervalTickerFactory`] the default, backed by [`tokio::time::interval_at`]
//! - [`ManualTickerFactory`] a test double driven by [`ManualTickerFactory::tick`]

mod interval;
mod manual;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

pub use interval::{IntervalTicker, IntervalTickerFactory};
pub use manual::{ManualTicker, ManualTickerFactory};

/// Delivers wake-ups at (roughly) fixed intervals.
#[async_trait]
pub trait Ticker: Send {
    /// Waits for the next wake-up.
    ///
    /// Returns `None` once the source is exhausted and will never tick again.
    async fn tick(&mut self) -> Option<Instant>;

    /// Releases the ticker. Further calls to `tick` return `None`.
    fn stop(&mut self);
}

/// Produces a [`Ticker`] for a given period.
pub trait TickerFactory: Send + Sync + 'static {
    /// Creates a ticker firing every `period`.
    fn create(&self, period: Duration) -> Box<dyn Ticker>;
}
