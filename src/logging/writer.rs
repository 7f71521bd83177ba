//! [`std::io::Write`] shim over a [`Logger`].

use std::io;
use std::sync::Arc;

use super::Logger;

/// Writer turning each `write` call into one info record.
///
/// Handy for plugging a logger into APIs that only accept a writer, such as a
/// child process' captured output. Invalid UTF-8 is replaced lossily.
#[derive(Clone)]
pub struct InfoWriter {
    logger: Arc<dyn Logger>,
}

impl InfoWriter {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl io::Write for InfoWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger
            .info(format_args!("{}", String::from_utf8_lossy(buf)));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.logger.sync()
    }
}
