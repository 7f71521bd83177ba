//! # procgroup
//!
//! **procgroup** is a small in-process supervision library for tokio.
//!
//! It runs several long-lived processes side by side, stops all of them when
//! one fails or a termination signal arrives, and drives periodic jobs with a
//! clock that tests can replace.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   worker     │   │     Cron     │   │   Shutdown   │
//!     │ (ProcessFn)  │   │ (job+ticker) │   │  (signals)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Group                                                            │
//! │  - one tokio task per process                                     │
//! │  - first failure remembered, then stop() on every process         │
//! │  - Exit::ShutdownRequested stops the group, never reported        │
//! │  - wait() awaits all tasks, returns the remembered failure        │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Shutdown path
//! ```text
//! SIGTERM ─► Shutdown::run() ─► Err(Exit::ShutdownRequested)
//!                 │                  └─► Group::stop() ─► process.stop() for each
//!                 └─► watchdog: sleep(grace) ─► exit(1) if still alive
//! ```
//!
//! ## Features
//! | Area          | Description                                              | Key types / traits                        |
//! |---------------|----------------------------------------------------------|-------------------------------------------|
//! | **Group**     | Run processes together, stop them together.              | [`Group`], [`Process`], [`ProcessFn`]     |
//! | **Cron**      | Periodic jobs with begin/exec/end hooks.                 | [`Cron`], [`CronJob`], [`LoggedJob`]      |
//! | **Shutdown**  | Signal-driven stop with a forced-exit deadline.          | [`Shutdown`], [`SignalSource`]            |
//! | **Time**      | Replaceable wake-up sources for deterministic tests.     | [`TickerFactory`], [`ManualTickerFactory`]|
//! | **Errors**    | Tagged outcome separating shutdown from failure.         | [`Exit`], [`ProcessError`]                |
//! | **Logging**   | Narrow sink trait with `tracing` and no-op backends.     | [`logging::Logger`]                       |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use procgroup::logging::{self, Logger, TracingLogger};
//! use procgroup::{Config, Cron, Exit, ExecFn, Group, LoggedJob, ProcessError, ProcessFn, ProcessRef, Shutdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!     logging::try_init(&cfg.log)?;
//!     let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
//!
//!     let worker: ProcessRef = ProcessFn::arc("worker", |ctx: CancellationToken| async move {
//!         ctx.cancelled().await;
//!         Ok::<(), Exit>(())
//!     });
//!
//!     let job = LoggedJob::new(
//!         "heartbeat",
//!         ExecFn::new(|| async { Ok::<(), ProcessError>(()) }),
//!         Arc::clone(&logger),
//!     );
//!     let cron: ProcessRef = Arc::new(Cron::new(job, Duration::from_secs(10)));
//!     let shutdown: ProcessRef = Arc::new(Shutdown::from_config(Arc::clone(&logger), &cfg)?);
//!
//!     let group = Group::with_logger(logger);
//!     group.add_and_run([worker, cron, shutdown]);
//!     group.wait().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
pub mod logging;
mod process;
mod ticker;

// ---- Public re-exports ----

pub use config::{Config, LogConfig};
pub use core::{
    Cron, CronJob, Exec, ExecFn, Group, LoggedJob, ManualSignals, OsSignals, ProcessExit,
    Shutdown, Signal, SignalSource, Terminator,
};
pub use error::{Exit, ProcessError};
pub use process::{Process, ProcessFn, ProcessRef};
pub use ticker::{
    IntervalTicker, IntervalTickerFactory, ManualTicker, ManualTickerFactory, Ticker,
    TickerFactory,
};
