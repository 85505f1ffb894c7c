//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::{self, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{LevelFilter, Record};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable first, then the
/// provided `level` overrides it for this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show every lookup the validator issues
/// mail_dns --log-level debug validate
///
/// # Machine-readable logs on stderr, report on stdout
/// mail_dns --log-format json validate > report.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("mail_dns", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                write_json_line(buf, record, chrono::Utc::now().timestamp_millis())
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second initialization (tests) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One log record as a single JSON object line: `ts` (epoch millis), `level`,
/// `target` and `msg`.
fn write_json_line<W: Write + ?Sized>(out: &mut W, record: &Record, ts: i64) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": ts,
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(out, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_fields() {
        let mut out = Vec::new();
        write_json_line(
            &mut out,
            &Record::builder()
                .args(format_args!("dig \"timed out\" for {}", "bad.mn"))
                .level(log::Level::Warn)
                .target("mail_dns::validation")
                .build(),
            1_700_000_000_000,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "mail_dns::validation");
        assert_eq!(value["msg"], "dig \"timed out\" for bad.mn");
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        // Only one logger can be installed per process; whichever call runs
        // second must come back as an error rather than a panic.
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(first.is_err() || second.is_err());
    }
}
