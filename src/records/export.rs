//! Bulk export of every configured domain.

use clap::ValueEnum;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::records::types::{CloudflareRecord, RecordSet};

/// Export format options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON (2-space indent)
    Json,
    /// Debug dump of the in-memory export structure
    Dump,
}

impl From<&str> for ExportFormat {
    /// `"json"` selects JSON; any other value falls back to the structure dump.
    fn from(value: &str) -> Self {
        if value == "json" {
            ExportFormat::Json
        } else {
            ExportFormat::Dump
        }
    }
}

/// Everything generated for one domain, or the reason generation failed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum DomainExport {
    Generated {
        dns_records: RecordSet,
        zone_file: String,
        cloudflare_format: Vec<CloudflareRecord>,
    },
    Failed {
        error: String,
    },
}

/// Per-domain exports keyed by domain name, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigExport {
    pub domains: Vec<(String, DomainExport)>,
}

impl ConfigExport {
    pub fn get(&self, domain: &str) -> Option<&DomainExport> {
        self.domains
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, export)| export)
    }

    /// Renders the export in `format`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if JSON serialization fails.
    pub fn render(&self, format: ExportFormat) -> Result<String, serde_json::Error> {
        match format {
            ExportFormat::Json => serde_json::to_string_pretty(self),
            ExportFormat::Dump => Ok(format!("{self:#?}")),
        }
    }
}

impl Serialize for ConfigExport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.domains.len()))?;
        for (domain, export) in &self.domains {
            map.serialize_entry(domain, export)?;
        }
        map.end()
    }
}
