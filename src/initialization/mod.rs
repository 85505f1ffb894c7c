//! Application initialization.
//!
//! This module sets up process-wide resources before any command runs.
//! Currently that is only the logger.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
