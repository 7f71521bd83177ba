//! # Termination signal sources.
//!
//! [`Shutdown`](crate::Shutdown) waits on a [`SignalSource`] rather than on the
//! process-wide handler table, so several triggers (or test runs) never share
//! registration state.
//!
//! ## Signals
//! **Unix platforms** ([`OsSignals`]):
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! [`ManualSignals`] raises signals from code, for tests.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::watch;

/// Termination signal observed by a [`SignalSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// `SIGINT` / Ctrl-C.
    Interrupt,
    /// `SIGTERM`.
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => f.write_str("interrupt"),
            Signal::Terminate => f.write_str("terminated"),
        }
    }
}

/// Source of process termination signals.
#[async_trait]
pub trait SignalSource: Send + Sync + 'static {
    /// Waits for the next termination signal.
    ///
    /// Never resolves if the source can no longer deliver signals.
    async fn wait(&self) -> Signal;
}

/// Listeners registered with the OS at construction time.
#[cfg(unix)]
pub struct OsSignals {
    streams: tokio::sync::Mutex<UnixStreams>,
}

#[cfg(unix)]
struct UnixStreams {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    /// Registers for `SIGINT` and `SIGTERM`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let interrupt = signal(SignalKind::interrupt())?;
        let terminate = signal(SignalKind::terminate())?;
        Ok(Self {
            streams: tokio::sync::Mutex::new(UnixStreams {
                interrupt,
                terminate,
            }),
        })
    }
}

#[cfg(unix)]
#[async_trait]
impl SignalSource for OsSignals {
    async fn wait(&self) -> Signal {
        let mut streams = self.streams.lock().await;
        let UnixStreams {
            interrupt,
            terminate,
        } = &mut *streams;

        tokio::select! {
            Some(()) = interrupt.recv() => Signal::Interrupt,
            Some(()) = terminate.recv() => Signal::Terminate,
            else => std::future::pending().await,
        }
    }
}

/// Ctrl-C listener.
#[cfg(not(unix))]
pub struct OsSignals {
    _private: (),
}

#[cfg(not(unix))]
impl OsSignals {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { _private: () })
    }
}

#[cfg(not(unix))]
#[async_trait]
impl SignalSource for OsSignals {
    async fn wait(&self) -> Signal {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Signal::Interrupt,
            Err(_) => std::future::pending().await,
        }
    }
}

/// Signal source raised explicitly with [`ManualSignals::raise`].
///
/// A raised signal stays observable: every later `wait` returns it at once.
#[derive(Debug)]
pub struct ManualSignals {
    tx: watch::Sender<Option<Signal>>,
}

impl ManualSignals {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Delivers `signal` to current and future waiters.
    pub fn raise(&self, signal: Signal) {
        self.tx.send_replace(Some(signal));
    }
}

impl Default for ManualSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSource for ManualSignals {
    async fn wait(&self) -> Signal {
        let mut rx = self.tx.subscribe();
        let raised = match rx.wait_for(Option::is_some).await {
            Ok(value) => *value,
            Err(_) => None,
        };
        match raised {
            Some(signal) => signal,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_manual_signal_wakes_waiter() {
        let signals = Arc::new(ManualSignals::new());
        let waiter = {
            let signals = Arc::clone(&signals);
            tokio::spawn(async move { signals.wait().await })
        };

        tokio::task::yield_now().await;
        signals.raise(Signal::Terminate);
        assert_eq!(waiter.await.expect("join"), Signal::Terminate);
    }

    #[tokio::test]
    async fn test_raised_before_wait_is_kept() {
        let signals = ManualSignals::new();
        signals.raise(Signal::Interrupt);
        assert_eq!(signals.wait().await, Signal::Interrupt);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_signal_never_resolves() {
        let signals = ManualSignals::new();
        let res = tokio::time::timeout(Duration::from_secs(60), signals.wait()).await;
        assert!(res.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Signal::Interrupt.to_string(), "interrupt");
        assert_eq!(Signal::Terminate.to_string(), "terminated");
    }
}
