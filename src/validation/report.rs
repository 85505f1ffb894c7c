//! Plain-text validation report.

use std::fmt::Write;

use crate::validation::check::{validate_mail_domain, MailDomainValidation, ValidationStatus};
use crate::validation::resolver::Resolver;

const FOUND_GLYPH: &str = "✓";
const MISSING_GLYPH: &str = "✗";

/// Validates each domain in turn and renders the report.
///
/// DNS problems only show up as statuses in the text; this never fails.
pub async fn generate_validation_report<R, S>(resolver: &R, domains: &[S]) -> String
where
    R: Resolver + ?Sized,
    S: AsRef<str>,
{
    let mut validations = Vec::with_capacity(domains.len());
    for domain in domains {
        log::info!("Validating {}", domain.as_ref());
        validations.push(validate_mail_domain(resolver, domain.as_ref(), None).await);
    }
    render_validation_report(&validations)
}

/// Renders already-collected validations.
///
/// A `Mismatch` line is added under a found check whose value differs from
/// the expected one.
pub fn render_validation_report(validations: &[MailDomainValidation]) -> String {
    let mut report = String::from("DNS Validation Report\n");
    report.push_str(&"=".repeat(50));
    report.push_str("\n\n");

    // Writing to a String cannot fail, hence the ignored results below
    for validation in validations {
        let _ = writeln!(report, "Domain: {}", validation.domain);
        report.push_str(&"-".repeat(30));
        report.push('\n');

        for (check, result) in &validation.checks {
            let glyph = if result.is_found() {
                FOUND_GLYPH
            } else {
                MISSING_GLYPH
            };
            let _ = writeln!(report, "{glyph} {check}: {}", result.status);

            match result.status {
                ValidationStatus::Found => {
                    if let Some(actual) = result.actual_value.as_deref().filter(|v| !v.is_empty()) {
                        let _ = writeln!(report, "  Value: {actual}");
                    }
                    if let (Some(false), Some(expected)) =
                        (result.matches, result.expected_value.as_deref())
                    {
                        let _ = writeln!(report, "  Mismatch: expected {expected}");
                    }
                }
                ValidationStatus::Error => {
                    let error = result
                        .error
                        .as_deref()
                        .map(str::trim_end)
                        .unwrap_or("Unknown error");
                    let _ = writeln!(report, "  Error: {error}");
                }
                ValidationStatus::Timeout => {}
            }
        }

        report.push('\n');
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordType;
    use crate::validation::check::{MailCheck, ValidationResult};

    fn result(status: ValidationStatus) -> ValidationResult {
        ValidationResult {
            domain: "bad.mn".into(),
            record_type: RecordType::A,
            status,
            actual_value: None,
            expected_value: None,
            matches: None,
            error: None,
        }
    }

    #[test]
    fn test_empty_report_header() {
        let report = render_validation_report(&[]);
        assert_eq!(
            report,
            format!("DNS Validation Report\n{}\n\n", "=".repeat(50))
        );
    }

    #[test]
    fn test_report_lines_per_status() {
        let mut found = result(ValidationStatus::Found);
        found.actual_value = Some("203.0.113.10".into());
        let mut empty = result(ValidationStatus::Found);
        empty.actual_value = Some(String::new());
        let mut error = result(ValidationStatus::Error);
        error.error = Some("boom\n".into());
        let bare_error = result(ValidationStatus::Error);
        let timeout = result(ValidationStatus::Timeout);

        let validation = MailDomainValidation {
            domain: "bad.mn".into(),
            checks: vec![
                (MailCheck::MailARecord, found),
                (MailCheck::MxRecord, empty),
                (MailCheck::SpfRecord, error),
                (MailCheck::DkimRecord, bare_error),
                (MailCheck::DmarcRecord, timeout),
            ],
        };

        let report = render_validation_report(&[validation]);
        let expected = format!(
            "DNS Validation Report\n{}\n\nDomain: bad.mn\n{}\n\
             ✓ mail_a_record: found\n  Value: 203.0.113.10\n\
             ✓ mx_record: found\n\
             ✗ spf_record: error\n  Error: boom\n\
             ✗ dkim_record: error\n  Error: Unknown error\n\
             ✗ dmarc_record: timeout\n\n",
            "=".repeat(50),
            "-".repeat(30)
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_flags_mismatch() {
        let mut found = result(ValidationStatus::Found);
        found.actual_value = Some("192.0.2.1".into());
        found.expected_value = Some("203.0.113.10".into());
        found.matches = Some(false);

        let report = render_validation_report(&[MailDomainValidation {
            domain: "bad.mn".into(),
            checks: vec![(MailCheck::MailARecord, found)],
        }]);
        assert!(report.contains("  Value: 192.0.2.1\n  Mismatch: expected 203.0.113.10\n"));
    }
}
