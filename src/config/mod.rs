//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (TTLs, SOA timers, resolver timeout)
//! - The registry of managed domains and their mail settings
//! - CLI option types for logging

mod constants;
mod domains;
mod types;

// Re-export all constants
pub use constants::*;
pub use domains::{DomainConfig, DomainRegistry};
pub use types::{LogFormat, LogLevel};
