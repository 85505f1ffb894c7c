//! Configuration constants.
//!
//! This module defines the fixed values baked into every generated zone:
//! TTLs, SOA timers, mail policy strings, and the resolver timeout.

use std::time::Duration;

/// Domains this tool manages.
///
/// Extending the set means adding an entry here; there is no runtime discovery.
pub const SUPPORTED_DOMAINS: &[&str] = &["bad.mn", "newera.sbs"];

/// Label of the mail host under each supported domain (`mail.<domain>`).
pub const MAIL_SUBDOMAIN_LABEL: &str = "mail";

// Record defaults
/// TTL applied to every generated record, in seconds
pub const DEFAULT_TTL: u32 = 3600;
/// Preference of the single MX record
pub const MX_PRIORITY: u16 = 10;
/// DKIM selector published under `<selector>._domainkey.<domain>`
pub const DKIM_SELECTOR: &str = "default";
/// Only CA allowed to issue certificates for the managed domains
pub const CAA_ISSUER: &str = "letsencrypt.org";

// SOA timers
pub const SOA_SERIAL: u32 = 2024010101;
pub const SOA_REFRESH: u32 = 3600;
pub const SOA_RETRY: u32 = 1800;
pub const SOA_EXPIRE: u32 = 604800;
pub const SOA_MINIMUM_TTL: u32 = 86400;

// Resolver
/// Executable used for live lookups
pub const DIG_COMMAND: &str = "dig";
/// Per-lookup timeout in seconds
pub const DIG_TIMEOUT_SECS: u64 = 10;
/// Per-lookup timeout as a `Duration`
pub const DIG_TIMEOUT: Duration = Duration::from_secs(DIG_TIMEOUT_SECS);
/// Reported when the lookup executable is not installed.
pub const DIG_MISSING_MESSAGE: &str = "dig command not found. Please install dnsutils.";
