//! External resolver invocation.
//!
//! Live lookups shell out to `dig +short <TYPE> <name>`. The `Resolver` trait
//! sits in front of that so report logic can run against a fake.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::{DIG_COMMAND, DIG_MISSING_MESSAGE, DIG_TIMEOUT};
use crate::error_handling::LookupError;
use crate::records::RecordType;

/// Source of short-form DNS answers.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Looks up `record_type` records for `name`.
    ///
    /// Returns the raw answer text (one record per line, possibly empty) when
    /// the lookup ran successfully.
    async fn query(&self, name: &str, record_type: RecordType) -> Result<String, LookupError>;
}

/// Resolver backed by the `dig` executable.
///
/// Each lookup is bounded by `timeout`. On expiry the spawned process is
/// killed; processes it started itself (e.g. from a wrapper script that does
/// not `exec`) are not, and may outlive the lookup.
#[derive(Debug, Clone)]
pub struct DigResolver {
    command: String,
    timeout: Duration,
}

impl DigResolver {
    /// Creates a resolver running `dig` with the default 10-second timeout.
    pub fn new() -> Self {
        Self {
            command: DIG_COMMAND.to_string(),
            timeout: DIG_TIMEOUT,
        }
    }

    /// Set the per-lookup timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different executable (must accept dig's arguments)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for DigResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for DigResolver {
    async fn query(&self, name: &str, record_type: RecordType) -> Result<String, LookupError> {
        log::debug!("{} +short {record_type} {name}", self.command);

        let child = Command::new(&self.command)
            .args(["+short", record_type.as_ref(), name])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found on PATH", self.command);
                return Err(LookupError::ToolMissing(DIG_MISSING_MESSAGE));
            }
            Err(e) => return Err(e.into()),
        };

        // Dropping the wait future on timeout kills the direct child only
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                log::warn!("{record_type} lookup for {name} timed out");
                return Err(LookupError::Timeout(self.timeout.as_secs()));
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::warn!(
                "{record_type} lookup for {name} exited with {}: {}",
                output.status,
                stderr.trim_end()
            );
            Err(LookupError::Process(stderr))
        }
    }
}
