//! mail_dns library: DNS configuration for mail-hosting domains
//!
//! This library generates the records a mail domain needs (A, MX, SPF, DMARC,
//! DKIM, CAA) for a fixed set of managed domains, renders them as structured
//! record lists, BIND zone files or Cloudflare import records, and checks live
//! DNS to see what is actually published.
//!
//! # Example
//!
//! ```no_run
//! use mail_dns::{generate_validation_report, DigResolver, DnsConfigGenerator, ExportFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut generator = DnsConfigGenerator::default();
//! generator.set_domain_config("bad.mn", "203.0.113.10", None, Some("MIIBIjANBg..."))?;
//!
//! println!("{}", generator.generate_zone_file("bad.mn")?);
//! println!("{}", generator.export_configuration(ExportFormat::Json)?);
//!
//! let report = generate_validation_report(&DigResolver::new(), &["bad.mn"]).await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Validation needs a Tokio runtime and the `dig` executable (dnsutils /
//! bind-utils). Generation is synchronous and has no external requirements.

pub mod config;
mod error_handling;
pub mod initialization;
pub mod records;
pub mod validation;

// Re-export public API
pub use config::{DomainConfig, DomainRegistry, LogFormat, LogLevel};
pub use error_handling::{GenerationError, InitializationError, LookupError};
pub use records::{
    CloudflareRecord, ConfigExport, DnsConfigGenerator, DnsRecord, DomainExport, ExportFormat,
    RecordSet, RecordType,
};
pub use validation::{
    check_dns_record, generate_validation_report, render_validation_report, validate_mail_domain,
    DigResolver, MailCheck, MailDomainValidation, Resolver, ValidationResult, ValidationStatus,
};
