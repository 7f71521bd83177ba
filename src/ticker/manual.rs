//! # Manually driven ticker for tests.
//!
//! Every [`ManualTicker`] created by one [`ManualTickerFactory`] reads from the
//! same queue, so a test keeps a clone of the factory and pushes ticks with
//! [`ManualTickerFactory::tick`] while the code under test waits on them.
//!
//! ```rust
//! use std::time::Duration;
//! use procgroup::{ManualTickerFactory, TickerFactory};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let factory = ManualTickerFactory::new();
//! let mut ticker = factory.create(Duration::from_secs(3600));
//!
//! factory.tick();
//! assert!(ticker.tick().await.is_some());
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;

use super::{Ticker, TickerFactory};

/// Factory handing out tickers fed from one shared queue.
///
/// Cheap to clone; clones share the queue and the stop counter.
#[derive(Clone, Debug)]
pub struct ManualTickerFactory {
    tx: mpsc::UnboundedSender<Instant>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Instant>>>,
    stops: Arc<AtomicUsize>,
}

impl ManualTickerFactory {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
            stops: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queues one wake-up, stamped with the current time.
    pub fn tick(&self) {
        self.tick_at(Instant::now());
    }

    /// Queues one wake-up with an explicit timestamp.
    pub fn tick_at(&self, at: Instant) {
        // The factory holds the receiver, so the queue is never closed.
        let _ = self.tx.send(at);
    }

    /// Number of tickers released through [`Ticker::stop`].
    pub fn stopped(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl Default for ManualTickerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerFactory for ManualTickerFactory {
    fn create(&self, _period: Duration) -> Box<dyn Ticker> {
        Box::new(ManualTicker {
            rx: Arc::clone(&self.rx),
            stops: Arc::clone(&self.stops),
            stopped: false,
        })
    }
}

/// Ticker produced by [`ManualTickerFactory`].
#[derive(Debug)]
pub struct ManualTicker {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Instant>>>,
    stops: Arc<AtomicUsize>,
    stopped: bool,
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) -> Option<Instant> {
        if self.stopped {
            return None;
        }
        self.rx.lock().await.recv().await
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_are_delivered_in_order() {
        let factory = ManualTickerFactory::new();
        let mut ticker = factory.create(Duration::from_secs(1));

        let a = Instant::now();
        let b = a + Duration::from_secs(1);
        factory.tick_at(a);
        factory.tick_at(b);

        assert_eq!(ticker.tick().await, Some(a));
        assert_eq!(ticker.tick().await, Some(b));
    }

    #[tokio::test]
    async fn test_stop_counted_once() {
        let factory = ManualTickerFactory::new();
        let mut ticker = factory.create(Duration::from_secs(1));

        ticker.stop();
        ticker.stop();
        factory.tick();

        assert_eq!(factory.stopped(), 1);
        assert!(ticker.tick().await.is_none());
    }
}
