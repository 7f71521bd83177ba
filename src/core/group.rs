//! # Group: run processes together, stop them together.
//!
//! A [`Group`] is much like a wait group, with a way to gracefully stop every
//! member. Each process runs on its own tokio task; the first real failure is
//! remembered and stops the whole group.
//!
//! ## Outcome handling
//! ```text
//! process.run() ─► Ok(())                        ─► nothing
//!              ├─► Err(Exit::ShutdownRequested)   ─► group.stop()
//!              ├─► Err(Exit::Failed(e))           ─► remember e (first wins), group.stop()
//!              └─► panic                          ─► as Failed(Panicked)
//!
//! group.stop()
//!   ├─► lock: stopped = true, snapshot processes
//!   └─► unlocked: process.stop() for each
//!
//! group.wait()
//!   └─► running count reaches zero (late additions included) ─► remembered error or Ok
//! ```
//!
//! ## Rules
//! - A stopped group silently ignores [`Group::add_and_run`].
//! - The lock guards bookkeeping only; no process code runs while it is held.
//! - [`Exit::ShutdownRequested`] never becomes the group's error.
//! - Any number of callers may [`Group::wait`] at once; each one returns only
//!   after every spawned task has finished.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use tokio::sync::watch;

use crate::error::{Exit, ProcessError};
use crate::logging::{Logger, NullLogger};
use crate::process::{Process, ProcessRef};

/// Runs processes concurrently and aggregates their outcome.
pub struct Group {
    inner: Mutex<Inner>,
    running: watch::Sender<usize>,
    logger: Arc<dyn Logger>,
}

#[derive(Default)]
struct Inner {
    stopped: bool,
    stop_err: Option<ProcessError>,
    processes: Vec<ProcessRef>,
}

/// Counts one spawned task as running until dropped.
struct Running(Arc<Group>);

impl Running {
    fn start(group: &Arc<Group>) -> Self {
        group.running.send_modify(|n| *n += 1);
        Self(Arc::clone(group))
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.0.running.send_modify(|n| *n -= 1);
    }
}

impl Group {
    /// Creates an empty group that does not log.
    pub fn new() -> Arc<Self> {
        Self::with_logger(Arc::new(NullLogger))
    }

    /// Creates an empty group logging process exits to `logger`.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Arc<Self> {
        let (running, _) = watch::channel(0);
        Arc::new(Self {
            inner: Mutex::new(Inner::default()),
            running,
            logger,
        })
    }

    /// Adds the processes to the group and spawns one task per process.
    ///
    /// Does nothing once the group is stopped: the processes are neither
    /// stored nor run.
    ///
    /// Must be called from within a tokio runtime.
    pub fn add_and_run(self: &Arc<Self>, processes: impl IntoIterator<Item = ProcessRef>) {
        let mut inner = self.lock();
        if inner.stopped {
            return;
        }

        for process in processes {
            inner.processes.push(Arc::clone(&process));

            // Counted while the lock is held, so a waiter never sees zero
            // between the store and the spawn.
            let running = Running::start(self);
            tokio::spawn(async move {
                let res = AssertUnwindSafe(process.run())
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        Err(Exit::Failed(ProcessError::Panicked {
                            process: process.name().to_string(),
                            reason: panic_reason(panic.as_ref()),
                        }))
                    });
                // Outcome is recorded before the task stops counting as running.
                running.0.on_exit(process.name(), res);
            });
        }
    }

    /// Handles the outcome of one process.
    fn on_exit(&self, name: &str, res: Result<(), Exit>) {
        match res {
            Ok(()) => {
                self.logger
                    .info_kv("process exited", &[("process", &name)]);
            }
            Err(Exit::ShutdownRequested) => {
                self.logger
                    .info_kv("process requested shutdown", &[("process", &name)]);
                self.stop();
            }
            Err(Exit::Failed(err)) => {
                self.logger.error_kv(
                    "process failed",
                    &[("process", &name), ("error", &err)],
                );
                self.update_stop_error(err);
                self.stop();
            }
        }
    }

    /// Remembers `err` unless an error is already remembered.
    fn update_stop_error(&self, err: ProcessError) {
        let mut inner = self.lock();
        if inner.stop_err.is_none() {
            inner.stop_err = Some(err);
        }
    }

    /// Stops every process in the group. Idempotent.
    pub fn stop(&self) {
        let processes = {
            let mut inner = self.lock();
            if inner.stopped {
                return;
            }
            inner.stopped = true;
            inner.processes.clone()
        };

        for process in processes {
            process.stop();
        }
    }

    /// Waits until every started process has returned.
    ///
    /// Returns the first failure reported by any process, or `Ok(())`.
    /// Safe to call from several tasks at once.
    pub async fn wait(&self) -> Result<(), ProcessError> {
        let mut running = self.running.subscribe();
        // Cannot fail: the sender lives in `self`.
        let _ = running.wait_for(|n| *n == 0).await;

        match self.lock().stop_err.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// True once [`Group::stop`] has run, explicitly or after a failure.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Number of processes added while the group was running.
    pub fn len(&self) -> usize {
        self.lock().processes.len()
    }

    /// True when no process was ever added while running.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Bookkeeping stays consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
