//! # Supervised-unit trait.
//!
//! A [`Process`] runs until it terminates on its own, fails, or is asked to
//! stop. The [`Group`](crate::Group) drives one tokio task per process and
//! calls [`Process::stop`] on every member when the group shuts down.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Exit;

/// Shared handle to a process.
pub type ProcessRef = Arc<dyn Process>;

/// # Long-lived unit of work with cooperative stop.
///
/// ### Contract
/// - [`run`](Process::run) completes when the process terminates:
///   `Ok(())` for a clean stop, [`Exit::ShutdownRequested`] for a deliberate
///   shutdown, [`Exit::Failed`] for a failure.
/// - [`stop`](Process::stop) requests termination. It must not block and must
///   be safe to call any number of times, concurrently with `run` and itself.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use procgroup::{Exit, Process};
///
/// struct Worker {
///     token: CancellationToken,
/// }
///
/// #[async_trait]
/// impl Process for Worker {
///     fn name(&self) -> &str { "worker" }
///
///     async fn run(&self) -> Result<(), Exit> {
///         self.token.cancelled().await;
///         Ok(())
///     }
///
///     fn stop(&self) {
///         self.token.cancel();
///     }
/// }
/// ```
#[async_trait]
pub trait Process: Send + Sync + 'static {
    /// Returns a stable, human-readable name used in logs and errors.
    fn name(&self) -> &str;

    /// Runs the process until it terminates.
    async fn run(&self) -> Result<(), Exit>;

    /// Requests termination. Idempotent.
    fn stop(&self);
}
