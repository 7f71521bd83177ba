//! Wall-clock ticker on top of [`tokio::time::Interval`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use super::{Ticker, TickerFactory};

/// [`tokio::time::interval_at`] panics on a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Ticker backed by a tokio interval.
///
/// The first tick fires one full period after creation. Ticks missed by a
/// slow consumer are skipped rather than delivered in a burst.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    /// Creates a ticker firing every `period` (clamped to at least 1ms).
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval: Some(interval),
        }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> Option<Instant> {
        match self.interval.as_mut() {
            Some(interval) => Some(interval.tick().await),
            None => None,
        }
    }

    fn stop(&mut self) {
        self.interval = None;
    }
}

/// Default [`TickerFactory`] producing [`IntervalTicker`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalTickerFactory;

impl IntervalTickerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl TickerFactory for IntervalTickerFactory {
    fn create(&self, period: Duration) -> Box<dyn Ticker> {
        Box::new(IntervalTicker::new(period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let start = Instant::now();
        let mut ticker = IntervalTickerFactory::new().create(Duration::from_secs(5));

        let first = ticker.tick().await.expect("tick");
        assert_eq!(first - start, Duration::from_secs(5));

        let second = ticker.tick().await.expect("tick");
        assert_eq!(second - first, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_is_exhausted() {
        let mut ticker = IntervalTicker::new(Duration::ZERO);
        ticker.stop();
        assert!(ticker.tick().await.is_none());
    }
}
