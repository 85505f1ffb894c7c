//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors returned by record, zone-file and provider-format generation.
///
/// Both variants are fatal to the call that produced them. The bulk export
/// path turns them into an inline `error` field per domain instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The domain is not part of the managed set.
    #[error("Domain {0} not supported")]
    UnsupportedDomain(String),

    /// Generation was attempted before a mail server IP was configured.
    #[error("Mail server IP not set for {0}")]
    MissingMailIp(String),
}

/// Failures of a single external lookup.
///
/// These never escape the validator: `check_dns_record` maps every variant
/// onto a `ValidationResult` status.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The lookup exceeded its timeout.
    #[error("DNS lookup timed out after {0} seconds")]
    Timeout(u64),

    /// The resolver executable is not installed.
    #[error("{0}")]
    ToolMissing(&'static str),

    /// The resolver ran and exited unsuccessfully; holds its stderr.
    #[error("{0}")]
    Process(String),

    /// Spawning or waiting on the resolver failed for another reason.
    #[error("Failed to run DNS lookup: {0}")]
    Io(#[from] std::io::Error),
}
