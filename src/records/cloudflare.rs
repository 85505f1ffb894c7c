//! Cloudflare bulk-import record format.

use crate::records::types::{CloudflareRecord, RecordSet, RecordType};

/// Converts a record set into Cloudflare API records.
///
/// The apex becomes `@`; every other name has each literal `.<domain>`
/// occurrence removed. The match is case-sensitive, so a name spelled with
/// different casing than `domain` is left untouched.
pub fn to_cloudflare_records(domain: &str, records: &RecordSet) -> Vec<CloudflareRecord> {
    let suffix = format!(".{domain}");

    records
        .iter()
        .map(|record| CloudflareRecord {
            record_type: record.record_type,
            name: if record.name == domain {
                "@".to_string()
            } else {
                record.name.replace(&suffix, "")
            },
            content: record.value.clone(),
            ttl: record.ttl,
            priority: if record.record_type == RecordType::Mx {
                record.priority
            } else {
                None
            },
        })
        .collect()
}
