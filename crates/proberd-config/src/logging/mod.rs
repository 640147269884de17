//! Logging abstractions for the config pipeline
//!
//! Resolution and substitution emit observational diagnostics (metadata
//! fallback, missing secrets) through this trait; callers plug in their own
//! sink.

mod console;
mod memory;
mod noop;
mod traits;

pub use console::ConsoleLogger;
pub use memory::{LogEntry, MemoryLogger};
pub use noop::NoOpLogger;
pub use traits::{Logger, SharedLogger};
