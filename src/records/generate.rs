//! Record set derivation from a domain's mail settings.

use crate::config::{DomainConfig, CAA_ISSUER, DEFAULT_TTL, DKIM_SELECTOR, MX_PRIORITY};
use crate::error_handling::GenerationError;
use crate::records::types::{DnsRecord, RecordSet, RecordType};

/// Returns the configured mail IP, or `MissingMailIp` if none (or an empty
/// one) was set.
pub(crate) fn require_mail_ip(config: &DomainConfig) -> Result<&str, GenerationError> {
    config
        .mail_server_ip
        .as_deref()
        .filter(|ip| !ip.is_empty())
        .ok_or_else(|| GenerationError::MissingMailIp(config.domain.clone()))
}

/// Web IP for the apex A record; the mail IP stands in when none was set.
pub(crate) fn web_ip<'a>(config: &'a DomainConfig, mail_ip: &'a str) -> &'a str {
    config
        .web_server_ip
        .as_deref()
        .filter(|ip| !ip.is_empty())
        .unwrap_or(mail_ip)
}

/// DKIM key to publish, if a non-empty one was set.
pub(crate) fn dkim_key(config: &DomainConfig) -> Option<&str> {
    config.dkim_public_key.as_deref().filter(|key| !key.is_empty())
}

pub(crate) fn spf_value(mail_host: &str, mail_ip: &str) -> String {
    format!("v=spf1 mx a:{mail_host} ip4:{mail_ip} ~all")
}

pub(crate) fn dkim_value(key: &str) -> String {
    format!("v=DKIM1; k=rsa; p={key}")
}

pub(crate) fn caa_value() -> String {
    format!("0 issue \"{CAA_ISSUER}\"")
}

fn dmarc_value(domain: &str) -> String {
    format!(
        "v=DMARC1; p=quarantine; rua=mailto:dmarc@{domain}; ruf=mailto:dmarc@{domain}; sp=quarantine; adkim=r; aspf=r"
    )
}

fn quoted(value: String) -> String {
    format!("\"{value}\"")
}

fn record(name: &str, record_type: RecordType, value: String) -> DnsRecord {
    DnsRecord {
        name: name.to_string(),
        record_type,
        priority: None,
        value,
        ttl: DEFAULT_TTL,
        description: None,
    }
}

fn described(mut record: DnsRecord, description: &str) -> DnsRecord {
    record.description = Some(description.to_string());
    record
}

/// Builds the full record set for one domain.
///
/// Emission order inside each bucket is fixed: apex before mail host for A
/// records, SPF then DMARC then (optionally) DKIM for TXT records.
///
/// # Errors
///
/// Returns `GenerationError::MissingMailIp` if no mail server IP is set.
pub fn build_record_set(config: &DomainConfig) -> Result<RecordSet, GenerationError> {
    let domain = config.domain.as_str();
    let mail_host = config.mail_subdomain.as_str();
    let mail_ip = require_mail_ip(config)?;
    let web_ip = web_ip(config, mail_ip);

    let mut mx = record(domain, RecordType::Mx, mail_host.to_string());
    mx.priority = Some(MX_PRIORITY);

    let mut txt = vec![
        described(
            record(domain, RecordType::Txt, quoted(spf_value(mail_host, mail_ip))),
            "SPF Record",
        ),
        described(
            record(
                &format!("_dmarc.{domain}"),
                RecordType::Txt,
                quoted(dmarc_value(domain)),
            ),
            "DMARC Record",
        ),
    ];

    if let Some(key) = dkim_key(config) {
        txt.push(described(
            record(
                &format!("{DKIM_SELECTOR}._domainkey.{domain}"),
                RecordType::Txt,
                quoted(dkim_value(key)),
            ),
            "DKIM Record",
        ));
    }

    log::debug!(
        "Generated {} TXT record(s) for {domain} (DKIM {})",
        txt.len(),
        if dkim_key(config).is_some() {
            "present"
        } else {
            "absent"
        }
    );

    Ok(RecordSet {
        a: vec![
            record(domain, RecordType::A, web_ip.to_string()),
            record(mail_host, RecordType::A, mail_ip.to_string()),
        ],
        mx: vec![mx],
        txt,
        caa: vec![record(domain, RecordType::Caa, caa_value())],
    })
}
