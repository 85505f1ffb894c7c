//! DNS record generation.
//!
//! This module derives everything a mail domain needs published from its
//! `DomainConfig`:
//! - Structured record sets (A, MX, TXT with SPF/DMARC/DKIM, CAA)
//! - BIND zone-file text
//! - Cloudflare bulk-import records
//! - A combined export of all configured domains (JSON or debug dump)

mod cloudflare;
mod export;
mod generate;
mod generator;
mod types;
mod zone;

// Re-export public API
pub use cloudflare::to_cloudflare_records;
pub use export::{ConfigExport, DomainExport, ExportFormat};
pub use generate::build_record_set;
pub use generator::DnsConfigGenerator;
pub use types::{CloudflareRecord, DnsRecord, RecordSet, RecordType};
pub use zone::render_zone_file;
