//! Record data types shared by the generator and the validator.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// DNS record types the tool generates or looks up.
///
/// `Display`/`AsRefStr` yield the wire mnemonic (`A`, `MX`, ...), which is also
/// what `dig` expects as its type argument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RecordType {
    A,
    #[strum(serialize = "MX")]
    #[serde(rename = "MX")]
    Mx,
    #[strum(serialize = "TXT")]
    #[serde(rename = "TXT")]
    Txt,
    #[strum(serialize = "CAA")]
    #[serde(rename = "CAA")]
    Caa,
}

/// A single generated resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    /// Fully-qualified owner name (no trailing dot)
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// MX preference; only set on MX records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Record data exactly as it would be published (TXT values keep their quotes)
    pub value: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generated records grouped by type, each bucket in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordSet {
    #[serde(rename = "A_RECORDS")]
    pub a: Vec<DnsRecord>,
    #[serde(rename = "MX_RECORDS")]
    pub mx: Vec<DnsRecord>,
    #[serde(rename = "TXT_RECORDS")]
    pub txt: Vec<DnsRecord>,
    #[serde(rename = "CAA_RECORDS")]
    pub caa: Vec<DnsRecord>,
}

impl RecordSet {
    /// All records flattened in bucket order: A, MX, TXT, CAA.
    pub fn iter(&self) -> impl Iterator<Item = &DnsRecord> {
        self.a
            .iter()
            .chain(self.mx.iter())
            .chain(self.txt.iter())
            .chain(self.caa.iter())
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.a.len() + self.mx.len() + self.txt.len() + self.caa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a Cloudflare bulk-import record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudflareRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// `@` for the apex, otherwise the name relative to the zone
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_record_type_mnemonics() {
        let names: Vec<String> = RecordType::iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["A", "MX", "TXT", "CAA"]);
    }

    #[test]
    fn test_record_type_parse_case_insensitive() {
        assert_eq!(RecordType::from_str("mx").unwrap(), RecordType::Mx);
        assert_eq!(RecordType::from_str("Txt").unwrap(), RecordType::Txt);
        assert!(RecordType::from_str("AAAA").is_err());
    }

    #[test]
    fn test_dns_record_json_omits_absent_fields() {
        let record = DnsRecord {
            name: "bad.mn".into(),
            record_type: RecordType::Caa,
            priority: None,
            value: "0 issue \"letsencrypt.org\"".into(),
            ttl: 3600,
            description: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "CAA");
        assert!(json.get("priority").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_record_set_json_bucket_names() {
        let json = serde_json::to_value(RecordSet::default()).unwrap();
        for key in ["A_RECORDS", "MX_RECORDS", "TXT_RECORDS", "CAA_RECORDS"] {
            assert!(json.get(key).is_some(), "missing bucket {key}");
        }
    }
}
