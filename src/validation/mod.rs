//! Live DNS validation.
//!
//! This module checks what is actually published for a mail domain:
//! - Single-record checks via an external resolver (`dig +short`)
//! - The five mail checks per domain (mail A, MX, SPF, DKIM, DMARC)
//! - A plain-text report over several domains
//!
//! Lookups run one at a time; each is bounded by the resolver's timeout.

mod check;
mod report;
mod resolver;

// Re-export public API
pub use check::{
    check_dns_record, validate_mail_domain, MailCheck, MailDomainValidation, ValidationResult,
    ValidationStatus,
};
pub use report::{generate_validation_report, render_validation_report};
pub use resolver::{DigResolver, Resolver};
