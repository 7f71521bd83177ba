//! Whole-process termination used by the shutdown watchdog.

/// Irreversibly ends the process.
///
/// Swapped out in tests to observe that the watchdog would have fired.
pub trait Terminator: Send + Sync + 'static {
    /// Terminates with the given exit code.
    fn terminate(&self, code: i32);
}

/// Calls [`std::process::exit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}
