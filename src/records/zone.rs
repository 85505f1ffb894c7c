//! BIND zone-file rendering.
//!
//! The layout (column padding, comments, blank lines) is fixed so the output
//! can be diffed against a reference zone.

use std::fmt::Write;

use crate::config::{
    DomainConfig, DEFAULT_TTL, DKIM_SELECTOR, MX_PRIORITY, SOA_EXPIRE, SOA_MINIMUM_TTL,
    SOA_REFRESH, SOA_RETRY, SOA_SERIAL,
};
use crate::error_handling::GenerationError;
use crate::records::generate::{
    caa_value, dkim_key, dkim_value, require_mail_ip, spf_value, web_ip,
};

/// Renders the zone file for one domain.
///
/// The left-hand column uses the mail host's first label (`mail`), while the
/// MX target and SPF `a:` mechanism use the full host name.
///
/// # Errors
///
/// Returns `GenerationError::MissingMailIp` if no mail server IP is set.
pub fn render_zone_file(config: &DomainConfig) -> Result<String, GenerationError> {
    let domain = config.domain.as_str();
    let mail_ip = require_mail_ip(config)?;
    let web_ip = web_ip(config, mail_ip);
    let mail = config.mail_label();

    let mut zone = format!(
        "$TTL {DEFAULT_TTL}
@   IN  SOA ns1.{domain}. admin.{domain}. (
    {SOA_SERIAL:<10}  ; Serial
    {SOA_REFRESH:<10}  ; Refresh
    {SOA_RETRY:<10}  ; Retry
    {SOA_EXPIRE:<10}  ; Expire
    {SOA_MINIMUM_TTL:<10}  ; Minimum TTL
)

; Name servers
@           IN  NS      ns1.{domain}.
@           IN  NS      ns2.{domain}.

; A records
@           IN  A       {web_ip}
{mail}        IN  A       {mail_ip}

; MX records
@           IN  MX  {MX_PRIORITY}  {mail}.{domain}.

; TXT records for email security
@           IN  TXT     \"{spf}\"
_dmarc      IN  TXT     \"v=DMARC1; p=quarantine; rua=mailto:dmarc@{domain}\"
",
        spf = spf_value(&format!("{mail}.{domain}"), mail_ip),
    );

    if let Some(key) = dkim_key(config) {
        // Writing to a String cannot fail
        let _ = writeln!(
            zone,
            "{DKIM_SELECTOR}._domainkey IN TXT \"{}\"",
            dkim_value(key)
        );
    }

    let _ = write!(
        zone,
        "
; CAA record
@           IN  CAA     {}
",
        caa_value()
    );

    log::debug!("Rendered zone file for {domain} ({} bytes)", zone.len());
    Ok(zone)
}
