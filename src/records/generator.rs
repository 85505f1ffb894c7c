//! The record generator: configured domains in, records and zone text out.

use crate::config::{DomainConfig, DomainRegistry};
use crate::error_handling::GenerationError;
use crate::records::cloudflare::to_cloudflare_records;
use crate::records::export::{ConfigExport, DomainExport, ExportFormat};
use crate::records::generate::build_record_set;
use crate::records::types::{CloudflareRecord, RecordSet};
use crate::records::zone::render_zone_file;

/// Generates DNS configurations for the domains in its registry.
///
/// # Examples
///
/// ```
/// use mail_dns::DnsConfigGenerator;
///
/// let mut generator = DnsConfigGenerator::default();
/// generator
///     .set_domain_config("bad.mn", "203.0.113.10", None, None)
///     .unwrap();
///
/// let records = generator.generate_records("bad.mn").unwrap();
/// assert_eq!(records.txt.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DnsConfigGenerator {
    registry: DomainRegistry,
}

impl DnsConfigGenerator {
    pub fn new(registry: DomainRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    /// Stores the mail settings for `domain`.
    ///
    /// `web_server_ip` defaults to `mail_server_ip`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnsupportedDomain` if `domain` is not managed.
    pub fn set_domain_config(
        &mut self,
        domain: &str,
        mail_server_ip: &str,
        web_server_ip: Option<&str>,
        dkim_public_key: Option<&str>,
    ) -> Result<(), GenerationError> {
        self.registry
            .configure(domain, mail_server_ip, web_server_ip, dkim_public_key)?;
        log::info!("Configured {domain} (mail server {mail_server_ip})");
        Ok(())
    }

    fn config(&self, domain: &str) -> Result<&DomainConfig, GenerationError> {
        self.registry.get(domain)
    }

    /// Generates the A, MX, TXT and CAA records for `domain`.
    ///
    /// # Errors
    ///
    /// `UnsupportedDomain` for unmanaged domains, `MissingMailIp` when the
    /// domain has no mail server IP yet.
    pub fn generate_records(&self, domain: &str) -> Result<RecordSet, GenerationError> {
        build_record_set(self.config(domain)?)
    }

    /// Generates the BIND zone file for `domain`.
    ///
    /// # Errors
    ///
    /// Same as [`generate_records`](Self::generate_records).
    pub fn generate_zone_file(&self, domain: &str) -> Result<String, GenerationError> {
        render_zone_file(self.config(domain)?)
    }

    /// Generates the Cloudflare bulk-import records for `domain`.
    ///
    /// # Errors
    ///
    /// Same as [`generate_records`](Self::generate_records).
    pub fn generate_cloudflare_format(
        &self,
        domain: &str,
    ) -> Result<Vec<CloudflareRecord>, GenerationError> {
        let records = self.generate_records(domain)?;
        Ok(to_cloudflare_records(domain, &records))
    }

    fn export_domain(&self, domain: &str) -> Result<DomainExport, GenerationError> {
        Ok(DomainExport::Generated {
            dns_records: self.generate_records(domain)?,
            zone_file: self.generate_zone_file(domain)?,
            cloudflare_format: self.generate_cloudflare_format(domain)?,
        })
    }

    /// Collects the export for every domain that has a mail server IP.
    ///
    /// Unconfigured domains are skipped. A generation failure is recorded
    /// inline for that domain and does not affect the others.
    pub fn collect_export(&self) -> ConfigExport {
        let domains = self
            .registry
            .iter()
            .filter(|config| config.is_configured())
            .map(|config| {
                let domain = config.domain.as_str();
                let export = self.export_domain(domain).unwrap_or_else(|e| {
                    log::warn!("Export failed for {domain}: {e}");
                    DomainExport::Failed {
                        error: e.to_string(),
                    }
                });
                (domain.to_string(), export)
            })
            .collect();

        ConfigExport { domains }
    }

    /// Exports every configured domain as text in `format`.
    ///
    /// # Errors
    ///
    /// Only fails if JSON serialization fails; per-domain generation errors
    /// are embedded in the output.
    pub fn export_configuration(&self, format: ExportFormat) -> Result<String, serde_json::Error> {
        self.collect_export().render(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::RecordType;

    fn bad_mn(dkim: Option<&str>) -> DnsConfigGenerator {
        let mut generator = DnsConfigGenerator::default();
        generator
            .set_domain_config("bad.mn", "203.0.113.10", None, dkim)
            .unwrap();
        generator
    }

    #[test]
    fn test_unsupported_domain_everywhere() {
        let generator = bad_mn(None);
        let expected = GenerationError::UnsupportedDomain("example.com".into());
        assert_eq!(generator.generate_records("example.com").unwrap_err(), expected);
        assert_eq!(
            generator.generate_zone_file("example.com").unwrap_err(),
            expected
        );
        assert_eq!(
            generator
                .generate_cloudflare_format("example.com")
                .unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_missing_mail_ip_everywhere() {
        let generator = bad_mn(None);
        let expected = GenerationError::MissingMailIp("newera.sbs".into());
        assert_eq!(generator.generate_records("newera.sbs").unwrap_err(), expected);
        assert_eq!(
            generator.generate_zone_file("newera.sbs").unwrap_err(),
            expected
        );
        assert_eq!(
            generator
                .generate_cloudflare_format("newera.sbs")
                .unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_generation_is_repeatable() {
        let generator = bad_mn(Some("ABCDEF"));
        assert_eq!(
            generator.generate_records("bad.mn").unwrap(),
            generator.generate_records("bad.mn").unwrap()
        );
        assert_eq!(
            generator.generate_zone_file("bad.mn").unwrap(),
            generator.generate_zone_file("bad.mn").unwrap()
        );
    }

    #[test]
    fn test_cloudflare_format_order() {
        let generator = bad_mn(Some("ABCDEF"));
        let records = generator.generate_cloudflare_format("bad.mn").unwrap();

        let summary: Vec<(RecordType, &str)> = records
            .iter()
            .map(|r| (r.record_type, r.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (RecordType::A, "@"),
                (RecordType::A, "mail"),
                (RecordType::Mx, "@"),
                (RecordType::Txt, "@"),
                (RecordType::Txt, "_dmarc"),
                (RecordType::Txt, "default._domainkey"),
                (RecordType::Caa, "@"),
            ]
        );
    }

    #[test]
    fn test_collect_export_skips_unconfigured() {
        let generator = bad_mn(None);
        let export = generator.collect_export();
        assert_eq!(export.domains.len(), 1);
        assert!(export.get("newera.sbs").is_none());
        assert!(matches!(
            export.get("bad.mn"),
            Some(DomainExport::Generated { .. })
        ));
    }

    #[test]
    fn test_custom_registry() {
        let mut generator = DnsConfigGenerator::new(DomainRegistry::new(["example.org"]));
        generator
            .set_domain_config("example.org", "192.0.2.1", None, None)
            .unwrap();
        assert!(generator.generate_records("example.org").is_ok());
        assert_eq!(
            generator.generate_records("bad.mn").unwrap_err(),
            GenerationError::UnsupportedDomain("bad.mn".into())
        );
    }
}
