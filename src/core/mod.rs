//! Runtime core: supervision and lifecycle coordination.
//!
//! - [`group`]: runs processes concurrently, aggregates failures, stops them together;
//! - [`cron`]: periodic execution of a single job;
//! - [`job`]: cron job contracts and helpers;
//! - [`shutdown`]: termination signal to cooperative stop, with a forced-exit deadline;
//! - [`signals`]: injectable OS signal sources;
//! - [`terminator`]: injectable forced process exit.

mod cron;
mod group;
mod job;
mod shutdown;
mod signals;
mod terminator;

pub use cron::Cron;
pub use group::Group;
pub use job::{CronJob, Exec, ExecFn, LoggedJob};
pub use shutdown::Shutdown;
pub use signals::{ManualSignals, OsSignals, Signal, SignalSource};
pub use terminator::{ProcessExit, Terminator};
