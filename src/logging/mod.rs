//! # Logging sink used by the runtime.
//!
//! The runtime never talks to a logging backend directly; it records through
//! the narrow [`Logger`] trait. No call through it can change control flow,
//! and [`NullLogger`] is a valid substitute anywhere.
//!
//! ## Contents
//! - [`Logger`] the sink trait (formatted and key/value variants)
//! - [`NullLogger`] discards everything
//! - [`TracingLogger`] forwards to the `tracing` macros
//! - [`InfoWriter`] adapts a logger to [`std::io::Write`]
//! - [`try_init`] installs a global `tracing-subscriber` fmt subscriber
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use procgroup::logging::{Logger, TracingLogger};
//!
//! let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
//! logger.info(format_args!("worker {} started", 7));
//! logger.error_kv("fetch failed", &[("attempt", &3), ("host", &"db-1")]);
//! ```

mod tracing_logger;
mod writer;

use std::fmt;
use std::io;

use tracing::metadata::LevelFilter;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

pub use tracing_logger::TracingLogger;
pub use writer::InfoWriter;

/// Key/value pairs attached to a structured record.
pub type Fields<'a> = &'a [(&'a str, &'a dyn fmt::Display)];

/// Narrow logging interface consumed by the runtime.
///
/// Plain messages go through [`info`](Logger::info) / [`error`](Logger::error)
/// with `format_args!("...")`; structured records use the `_kv` variants.
pub trait Logger: Send + Sync + 'static {
    /// Records an informational message.
    fn info(&self, args: fmt::Arguments<'_>);

    /// Records an error message.
    fn error(&self, args: fmt::Arguments<'_>);

    /// Records an informational message with key/value context.
    fn info_kv(&self, msg: &str, fields: Fields<'_>);

    /// Records an error message with key/value context.
    fn error_kv(&self, msg: &str, fields: Fields<'_>);

    /// Flushes buffered records, if the backend buffers.
    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Logger that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _args: fmt::Arguments<'_>) {}

    fn error(&self, _args: fmt::Arguments<'_>) {}

    fn info_kv(&self, _msg: &str, _fields: Fields<'_>) {}

    fn error_kv(&self, _msg: &str, _fields: Fields<'_>) {}
}

/// Renders `msg key=value ...` the way [`TracingLogger`] emits structured records.
pub(crate) fn render_kv(msg: &str, fields: Fields<'_>) -> String {
    let mut out = String::from(msg);
    for (key, value) in fields {
        out.push(' ');
        out.push_str(key);
        out.push('=');
        out.push_str(&value.to_string());
    }
    out
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("init logging error: `{0}`")]
    TryInit(String),
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter`]. Fails when a global
/// subscriber is already set.
pub fn try_init(cfg: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(
            std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| cfg.filter.clone()),
        );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cfg.ansi)
        .try_init()
        .map_err(|err| LoggingError::TryInit(err.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Logger keeping every record in memory, prefixed with its level.
    #[derive(Default)]
    pub(crate) struct MemoryLogger {
        lines: Mutex<Vec<String>>,
    }

    impl MemoryLogger {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.lock().expect("lock").clone()
        }

        fn push(&self, line: String) {
            self.lines.lock().expect("lock").push(line);
        }
    }

    impl Logger for MemoryLogger {
        fn info(&self, args: fmt::Arguments<'_>) {
            self.push(format!("INFO {args}"));
        }

        fn error(&self, args: fmt::Arguments<'_>) {
            self.push(format!("ERROR {args}"));
        }

        fn info_kv(&self, msg: &str, fields: Fields<'_>) {
            self.push(format!("INFO {}", render_kv(msg, fields)));
        }

        fn error_kv(&self, msg: &str, fields: Fields<'_>) {
            self.push(format!("ERROR {}", render_kv(msg, fields)));
        }
    }
}
