//! Error types used by the procgroup runtime and supervised processes.
//!
//! - [`ProcessError`] — an ordinary failure reported by a process, a cron job
//!   or the runtime itself.
//! - [`Exit`] — the outcome of [`Process::run`](crate::Process::run): either an
//!   ordinary failure or the benign [`Exit::ShutdownRequested`] marker.
//!
//! [`Group::wait`](crate::Group::wait) only ever returns [`ProcessError`], so a
//! requested shutdown cannot be reported as the group's failure.

use std::fmt;

use thiserror::Error;

/// # Errors produced by supervised processes.
///
/// Messages are kept as strings so the error can be cloned out of the group's
/// failure slot on every [`Group::wait`](crate::Group::wait) call.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Process or job failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Process panicked inside `run`.
    #[error("process {process} panicked: {reason}")]
    Panicked {
        /// Name of the panicking process.
        process: String,
        /// Panic payload, when it was a string.
        reason: String,
    },

    /// Registering for OS termination signals failed.
    #[error("signal registration failed: {error}")]
    Signal {
        /// The underlying I/O error message.
        error: String,
    },
}

impl ProcessError {
    /// Builds a [`ProcessError::Fail`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use procgroup::ProcessError;
    ///
    /// let err = ProcessError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl fmt::Display) -> Self {
        ProcessError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procgroup::ProcessError;
    ///
    /// assert_eq!(ProcessError::fail("boom").as_label(), "process_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProcessError::Fail { .. } => "process_failed",
            ProcessError::Panicked { .. } => "process_panicked",
            ProcessError::Signal { .. } => "signal_registration",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ProcessError::Fail { error } => format!("error: {error}"),
            ProcessError::Panicked { process, reason } => {
                format!("panic in {process}: {reason}")
            }
            ProcessError::Signal { error } => format!("signal: {error}"),
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::Signal {
            error: err.to_string(),
        }
    }
}

/// # Why a process stopped, when it did not stop cleanly.
///
/// `Ok(())` from [`Process::run`](crate::Process::run) means a clean, requested
/// termination. The `Err` side distinguishes a deliberate shutdown from a real
/// failure structurally, never by comparing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// A termination signal was observed; stop the group without reporting an error.
    #[error("shutdown requested")]
    ShutdownRequested,

    /// Ordinary failure; the first one becomes the group's result.
    #[error(transparent)]
    Failed(#[from] ProcessError),
}

impl Exit {
    /// True for the benign shutdown marker.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Exit::ShutdownRequested)
    }

    /// Returns the failure, if this exit carries one.
    pub fn into_failure(self) -> Option<ProcessError> {
        match self {
            Exit::ShutdownRequested => None,
            Exit::Failed(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_message() {
        let err = ProcessError::fail("boom");
        assert_eq!(err, ProcessError::Fail { error: "boom".into() });
        assert_eq!(err.as_message(), "error: boom");
    }

    #[test]
    fn test_io_error_maps_to_signal() {
        let io = std::io::Error::other("no handler");
        let err: ProcessError = io.into();
        assert_eq!(err.as_label(), "signal_registration");
    }

    #[test]
    fn test_shutdown_marker_is_not_a_failure() {
        assert!(Exit::ShutdownRequested.is_shutdown());
        assert_eq!(Exit::ShutdownRequested.into_failure(), None);

        let exit: Exit = ProcessError::fail("shutdown requested").into();
        assert!(!exit.is_shutdown());
        assert_eq!(
            exit.into_failure(),
            Some(ProcessError::fail("shutdown requested"))
        );
    }
}
