//! Console logger implementation

use super::traits::Logger;

/// Writes diagnostics to the process streams
///
/// Info and debug go to stdout; warnings and errors go to stderr, so a
/// `dump_config` piped to a file stays free of fallback and missing-secret
/// noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        println!("proberd-config debug: {message}");
    }

    fn info(&self, message: &str) {
        println!("proberd-config info: {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("proberd-config warn: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("proberd-config error: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_logs() {
        // Verifies the logger doesn't panic.
        let logger = ConsoleLogger::new();
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
