//! Per-record checks against live DNS.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::config::{DKIM_SELECTOR, MAIL_SUBDOMAIN_LABEL};
use crate::error_handling::LookupError;
use crate::records::RecordType;
use crate::validation::resolver::Resolver;

/// Outcome of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidationStatus {
    Found,
    Error,
    Timeout,
}

/// Result of checking one record type on one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub domain: String,
    pub record_type: RecordType,
    pub status: ValidationStatus,
    /// Trimmed resolver output; only set when the lookup succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    /// Only set when the lookup succeeded and an expected value was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn is_found(&self) -> bool {
        self.status == ValidationStatus::Found
    }
}

/// Checks whether `record_type` records exist for `domain`.
///
/// Never fails: timeouts, a missing resolver and resolver errors all come back
/// as a status on the result.
pub async fn check_dns_record<R>(
    resolver: &R,
    domain: &str,
    record_type: RecordType,
    expected_value: Option<&str>,
) -> ValidationResult
where
    R: Resolver + ?Sized,
{
    let expected_value = expected_value.filter(|e| !e.is_empty());
    let mut result = ValidationResult {
        domain: domain.to_string(),
        record_type,
        status: ValidationStatus::Found,
        actual_value: None,
        expected_value: expected_value.map(str::to_string),
        matches: None,
        error: None,
    };

    match resolver.query(domain, record_type).await {
        Ok(output) => {
            let actual = output.trim().to_string();
            result.matches = expected_value.map(|expected| actual == expected);
            result.actual_value = Some(actual);
        }
        Err(LookupError::Timeout(_)) => {
            result.status = ValidationStatus::Timeout;
        }
        Err(e) => {
            result.status = ValidationStatus::Error;
            result.error = Some(e.to_string());
        }
    }

    log::debug!("{record_type} {domain}: {}", result.status);
    result
}

/// The five checks run for every mail domain, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MailCheck {
    MailARecord,
    MxRecord,
    SpfRecord,
    DkimRecord,
    DmarcRecord,
}

impl MailCheck {
    /// Name queried and record type used for this check on `domain`.
    pub fn target(&self, domain: &str) -> (String, RecordType) {
        match self {
            MailCheck::MailARecord => {
                (format!("{MAIL_SUBDOMAIN_LABEL}.{domain}"), RecordType::A)
            }
            MailCheck::MxRecord => (domain.to_string(), RecordType::Mx),
            MailCheck::SpfRecord => (domain.to_string(), RecordType::Txt),
            MailCheck::DkimRecord => {
                (format!("{DKIM_SELECTOR}._domainkey.{domain}"), RecordType::Txt)
            }
            MailCheck::DmarcRecord => (format!("_dmarc.{domain}"), RecordType::Txt),
        }
    }
}

/// All mail checks for one domain, keyed by check name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDomainValidation {
    pub domain: String,
    pub checks: Vec<(MailCheck, ValidationResult)>,
}

impl MailDomainValidation {
    pub fn get(&self, check: MailCheck) -> Option<&ValidationResult> {
        self.checks
            .iter()
            .find(|(c, _)| *c == check)
            .map(|(_, result)| result)
    }

    /// True when every check found a record.
    pub fn all_found(&self) -> bool {
        self.checks.iter().all(|(_, result)| result.is_found())
    }
}

impl Serialize for MailDomainValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.checks.len()))?;
        for (check, result) in &self.checks {
            map.serialize_entry(&check.to_string(), result)?;
        }
        map.end()
    }
}

/// Runs every mail check for `domain`, one lookup after another.
///
/// Only the mail host's A record is compared, against `expected_mail_ip`. A
/// failing check does not stop the remaining ones.
pub async fn validate_mail_domain<R>(
    resolver: &R,
    domain: &str,
    expected_mail_ip: Option<&str>,
) -> MailDomainValidation
where
    R: Resolver + ?Sized,
{
    use strum::IntoEnumIterator;

    let mut checks = Vec::with_capacity(5);
    for check in MailCheck::iter() {
        let (name, record_type) = check.target(domain);
        let expected = match check {
            MailCheck::MailARecord => expected_mail_ip,
            _ => None,
        };
        let result = check_dns_record(resolver, &name, record_type, expected).await;
        checks.push((check, result));
    }

    MailDomainValidation {
        domain: domain.to_string(),
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapResolver {
        answers: HashMap<(String, RecordType), String>,
    }

    impl MapResolver {
        fn answer(mut self, name: &str, record_type: RecordType, value: &str) -> Self {
            self.answers
                .insert((name.to_string(), record_type), value.to_string());
            self
        }
    }

    #[async_trait]
    impl Resolver for MapResolver {
        async fn query(&self, name: &str, record_type: RecordType) -> Result<String, LookupError> {
            match self.answers.get(&(name.to_string(), record_type)) {
                Some(value) => Ok(value.clone()),
                None if name.starts_with("slow.") => Err(LookupError::Timeout(10)),
                None => Err(LookupError::Process("SERVFAIL\n".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_found_trims_and_matches() {
        let resolver =
            MapResolver::default().answer("mail.bad.mn", RecordType::A, "203.0.113.10\n");

        let hit =
            check_dns_record(&resolver, "mail.bad.mn", RecordType::A, Some("203.0.113.10")).await;
        assert_eq!(hit.status, ValidationStatus::Found);
        assert_eq!(hit.actual_value.as_deref(), Some("203.0.113.10"));
        assert_eq!(hit.matches, Some(true));

        let miss =
            check_dns_record(&resolver, "mail.bad.mn", RecordType::A, Some("192.0.2.1")).await;
        assert_eq!(miss.matches, Some(false));
    }

    #[tokio::test]
    async fn test_found_without_expected_has_no_match_flag() {
        let resolver =
            MapResolver::default().answer("bad.mn", RecordType::Mx, "10 mail.bad.mn.\n");
        let result = check_dns_record(&resolver, "bad.mn", RecordType::Mx, None).await;
        assert!(result.is_found());
        assert_eq!(result.matches, None);
    }

    #[tokio::test]
    async fn test_empty_expected_value_is_ignored() {
        let resolver =
            MapResolver::default().answer("mail.bad.mn", RecordType::A, "203.0.113.10\n");
        let result = check_dns_record(&resolver, "mail.bad.mn", RecordType::A, Some("")).await;
        assert!(result.is_found());
        assert_eq!(result.expected_value, None);
        assert_eq!(result.matches, None);
    }

    #[tokio::test]
    async fn test_error_and_timeout_statuses() {
        let resolver = MapResolver::default();

        let error = check_dns_record(&resolver, "bad.mn", RecordType::Txt, None).await;
        assert_eq!(error.status, ValidationStatus::Error);
        assert_eq!(error.error.as_deref(), Some("SERVFAIL\n"));
        assert!(error.actual_value.is_none());

        let timeout = check_dns_record(&resolver, "slow.bad.mn", RecordType::Txt, None).await;
        assert_eq!(timeout.status, ValidationStatus::Timeout);
        assert!(timeout.error.is_none());
    }

    #[test]
    fn test_mail_check_names_and_targets() {
        use strum::IntoEnumIterator;

        let names: Vec<String> = MailCheck::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["mail_a_record", "mx_record", "spf_record", "dkim_record", "dmarc_record"]
        );
        assert_eq!(
            MailCheck::DkimRecord.target("bad.mn"),
            ("default._domainkey.bad.mn".to_string(), RecordType::Txt)
        );
        assert_eq!(
            MailCheck::MailARecord.target("bad.mn"),
            ("mail.bad.mn".to_string(), RecordType::A)
        );
    }

    #[tokio::test]
    async fn test_validate_mail_domain_continues_after_failures() {
        let resolver = MapResolver::default()
            .answer("mail.bad.mn", RecordType::A, "203.0.113.10")
            .answer("_dmarc.bad.mn", RecordType::Txt, "\"v=DMARC1; p=quarantine\"");

        let validation = validate_mail_domain(&resolver, "bad.mn", Some("203.0.113.10")).await;
        assert_eq!(validation.checks.len(), 5);
        assert!(!validation.all_found());
        assert_eq!(
            validation.get(MailCheck::MailARecord).unwrap().matches,
            Some(true)
        );
        assert_eq!(
            validation.get(MailCheck::MxRecord).unwrap().status,
            ValidationStatus::Error
        );
        assert!(validation.get(MailCheck::DmarcRecord).unwrap().is_found());
        // expected IP only applies to the mail host A record
        assert_eq!(validation.get(MailCheck::SpfRecord).unwrap().expected_value, None);
    }

    #[tokio::test]
    async fn test_validation_json_keys() {
        let resolver = MapResolver::default();
        let validation = validate_mail_domain(&resolver, "bad.mn", None).await;
        let json = serde_json::to_value(&validation).unwrap();
        assert_eq!(json["dkim_record"]["status"], "error");
        assert_eq!(json["dkim_record"]["domain"], "default._domainkey.bad.mn");
        assert_eq!(json["mx_record"]["record_type"], "MX");
    }
}
