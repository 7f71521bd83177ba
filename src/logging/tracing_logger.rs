use std::fmt;

use super::{Fields, Logger, render_kv};

/// [`Logger`] that forwards records to the `tracing` macros.
///
/// Key/value records are rendered inline as `msg key=value ...` since the set
/// of keys is only known at runtime.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self {
            component: "procgroup",
        }
    }

    /// Overrides the `component` field attached to every record.
    pub fn with_component(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(component = self.component, "{args}");
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(component = self.component, "{args}");
    }

    fn info_kv(&self, msg: &str, fields: Fields<'_>) {
        tracing::info!(component = self.component, "{}", render_kv(msg, fields));
    }

    fn error_kv(&self, msg: &str, fields: Fields<'_>) {
        tracing::error!(component = self.component, "{}", render_kv(msg, fields));
    }
}
