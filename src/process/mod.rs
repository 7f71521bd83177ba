//! # Process abstractions.
//!
//! This module provides the supervised-unit contract:
//! - [`Process`] - trait for anything with a blocking `run` and an idempotent `stop`
//! - [`ProcessRef`] - shared reference to a process (`Arc<dyn Process>`)
//! - [`ProcessFn`] - closure-backed process for ad-hoc workers

mod process;
mod process_fn;

pub use process::{Process, ProcessRef};
pub use process_fn::ProcessFn;
