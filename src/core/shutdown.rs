//! # Shutdown: signal-to-cancellation bridge with a forced-exit deadline.
//!
//! [`Shutdown`] is a [`Process`] that does nothing but wait. Added to a
//! [`Group`](crate::Group), it turns a termination signal into a group-wide
//! stop without being reported as a failure.
//!
//! ## Flow
//! ```text
//! Shutdown::run()
//!   ├─► signal received ─► arm watchdog ─► Err(Exit::ShutdownRequested)
//!   │                                        (group stops, wait() stays Ok)
//!   └─► stop() called   ─► arm watchdog ─► Ok(())
//!
//! watchdog: sleep(grace) ─► log error ─► Terminator::terminate(1)
//! ```
//!
//! ## Rules
//! - Signal listeners are registered in [`Shutdown::new`], not in `run`.
//! - `stop` closes the internal signal at most once.
//! - The watchdog has no cancellation path; it is the deadline for the rest of
//!   the group to exit on its own.
//! - The watchdog runs on its own OS thread and fires even when every runtime
//!   worker is blocked.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::signals::{OsSignals, SignalSource};
use crate::core::terminator::{ProcessExit, Terminator};
use crate::error::{Exit, ProcessError};
use crate::logging::Logger;
use crate::process::Process;

/// Waits for a termination signal or an explicit stop.
///
/// Termination is guaranteed within `grace` once either happened.
pub struct Shutdown {
    logger: Arc<dyn Logger>,
    grace: Duration,
    signals: Arc<dyn SignalSource>,
    terminator: Arc<dyn Terminator>,
    done: CancellationToken,
    stopped: AtomicBool,
}

impl Shutdown {
    /// Creates a trigger listening for OS termination signals.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(logger: Arc<dyn Logger>, grace: Duration) -> Result<Self, ProcessError> {
        let signals = OsSignals::new()?;
        Ok(Self::with_signals(logger, grace, Arc::new(signals)))
    }

    /// Same as [`Shutdown::new`] with the grace period from `cfg`.
    pub fn from_config(logger: Arc<dyn Logger>, cfg: &Config) -> Result<Self, ProcessError> {
        Self::new(logger, cfg.grace())
    }

    /// Creates a trigger waiting on an arbitrary signal source.
    pub fn with_signals(
        logger: Arc<dyn Logger>,
        grace: Duration,
        signals: Arc<dyn SignalSource>,
    ) -> Self {
        Self {
            logger,
            grace,
            signals,
            terminator: Arc::new(ProcessExit),
            done: CancellationToken::new(),
            stopped: AtomicBool::new(false),
        }
    }

    /// Replaces the forced-exit primitive used by the watchdog.
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Configured grace period.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Starts the watchdog thread forcing the exit once the grace period elapses.
    fn ensure_termination(&self) {
        let grace = self.grace;
        let logger = Arc::clone(&self.logger);
        let terminator = Arc::clone(&self.terminator);

        let spawned = thread::Builder::new()
            .name("shutdown-watchdog".into())
            .spawn({
                let logger = Arc::clone(&logger);
                move || {
                    thread::sleep(grace);
                    logger.error(format_args!(
                        "Shutdown: failed to shutdown within {grace:?}; exit forced"
                    ));
                    terminator.terminate(1);
                }
            });
        if let Err(err) = spawned {
            logger.error(format_args!("Shutdown: failed to start watchdog: {err}"));
        }
    }
}

#[async_trait]
impl Process for Shutdown {
    fn name(&self) -> &str {
        "shutdown"
    }

    async fn run(&self) -> Result<(), Exit> {
        tokio::select! {
            sig = self.signals.wait() => {
                self.logger.info(format_args!("Shutdown: process received signal {sig}"));
                self.ensure_termination();
                Err(Exit::ShutdownRequested)
            }
            _ = self.done.cancelled() => {
                self.logger.info(format_args!("Shutdown: stopped"));
                self.ensure_termination();
                Ok(())
            }
        }
    }

    fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            self.done.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Instant;

    use super::*;
    use crate::core::signals::{ManualSignals, Signal};
    use crate::logging::testing::MemoryLogger;

    const GRACE: Duration = Duration::from_millis(200);

    #[derive(Default)]
    struct ExitSpy {
        codes: Mutex<Vec<i32>>,
    }

    impl ExitSpy {
        fn codes(&self) -> Vec<i32> {
            self.codes.lock().expect("lock").clone()
        }

        /// Blocks the calling thread until the watchdog fired or `within` elapsed.
        fn wait_fired(&self, within: Duration) -> Vec<i32> {
            let deadline = Instant::now() + within;
            while self.codes().is_empty() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            self.codes()
        }
    }

    impl Terminator for ExitSpy {
        fn terminate(&self, code: i32) {
            self.codes.lock().expect("lock").push(code);
        }
    }

    fn trigger(grace: Duration) -> (Shutdown, Arc<ManualSignals>, Arc<ExitSpy>, Arc<MemoryLogger>) {
        let signals = Arc::new(ManualSignals::new());
        let spy = Arc::new(ExitSpy::default());
        let logger = Arc::new(MemoryLogger::default());
        let shutdown = Shutdown::with_signals(logger.clone(), grace, signals.clone())
            .with_terminator(spy.clone());
        (shutdown, signals, spy, logger)
    }

    #[tokio::test]
    async fn test_signal_returns_shutdown_marker() {
        let (shutdown, signals, spy, logger) = trigger(GRACE);

        signals.raise(Signal::Terminate);
        let armed = Instant::now();
        assert_eq!(shutdown.run().await, Err(Exit::ShutdownRequested));
        assert_eq!(
            logger.lines(),
            vec!["INFO Shutdown: process received signal terminated"]
        );
        assert!(spy.codes().is_empty());

        assert_eq!(spy.wait_fired(Duration::from_secs(5)), vec![1]);
        assert!(armed.elapsed() >= GRACE);
        assert_eq!(
            logger.lines().last().map(String::as_str),
            Some("ERROR Shutdown: failed to shutdown within 200ms; exit forced")
        );
    }

    #[tokio::test]
    async fn test_stop_returns_ok_and_arms_watchdog() {
        let (shutdown, _signals, spy, _logger) = trigger(GRACE);

        shutdown.stop();
        let armed = Instant::now();
        assert_eq!(shutdown.run().await, Ok(()));
        assert!(spy.codes().is_empty());

        assert_eq!(spy.wait_fired(Duration::from_secs(5)), vec![1]);
        assert!(armed.elapsed() >= GRACE);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (shutdown, _signals, spy, _logger) = trigger(Duration::from_millis(20));
        let shutdown = Arc::new(shutdown);

        let runner = {
            let shutdown = Arc::clone(&shutdown);
            tokio::spawn(async move { shutdown.run().await })
        };

        shutdown.stop();
        shutdown.stop();
        assert_eq!(runner.await.expect("join"), Ok(()));

        assert_eq!(spy.wait_fired(Duration::from_secs(5)), vec![1]);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(spy.codes(), vec![1]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_watchdog_fires_while_runtime_is_blocked() {
        let (shutdown, signals, spy, _logger) = trigger(Duration::from_millis(50));

        signals.raise(Signal::Interrupt);
        assert_eq!(shutdown.run().await, Err(Exit::ShutdownRequested));

        // Hung shutdown: the only runtime thread never yields again.
        thread::sleep(Duration::from_millis(500));
        assert_eq!(spy.codes(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_happens_without_signal_or_stop() {
        let (shutdown, _signals, spy, _logger) = trigger(Duration::from_secs(1));

        let res = tokio::time::timeout(Duration::from_secs(60), shutdown.run()).await;
        assert!(res.is_err());
        assert!(spy.codes().is_empty());
    }
}
