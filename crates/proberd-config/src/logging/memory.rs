//! In-memory logger for tests

use std::sync::RwLock;

use super::traits::Logger;

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: &'static str,
    pub message: String,
}

/// A logger that records entries in memory
///
/// Lets tests assert on the diagnostics a pipeline stage emitted.
///
/// # Thread Safety
///
/// Uses `RwLock` internally and is safe to share across threads.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RwLock<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create a new empty memory logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries, in order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Messages captured at a given level
    pub fn messages_at(&self, level: &str) -> Vec<String> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Warning messages, in order
    pub fn warnings(&self) -> Vec<String> {
        self.messages_at("warn")
    }

    /// Info messages, in order
    pub fn infos(&self) -> Vec<String> {
        self.messages_at("info")
    }

    /// Discard all captured entries
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    fn push(&self, level: &'static str, message: &str) {
        self.entries.write().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_captures_in_order() {
        let logger = MemoryLogger::new();
        logger.info("first");
        logger.warn("second");
        logger.info("third");

        assert_eq!(logger.infos(), vec!["first", "third"]);
        assert_eq!(logger.warnings(), vec!["second"]);
        assert_eq!(logger.entries().len(), 3);

        logger.clear();
        assert!(logger.entries().is_empty());
    }
}
