//! Per-domain mail settings and the registry of managed domains.

use serde::Serialize;

use crate::config::constants::{MAIL_SUBDOMAIN_LABEL, SUPPORTED_DOMAINS};
use crate::error_handling::GenerationError;

/// Mail-hosting settings for one managed domain.
///
/// Every field except the names starts unset; `DomainRegistry::configure`
/// fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainConfig {
    /// Apex domain, e.g. `bad.mn`
    pub domain: String,
    /// Fully-qualified mail host, e.g. `mail.bad.mn`
    pub mail_subdomain: String,
    pub mail_server_ip: Option<String>,
    /// Falls back to the mail server IP when not given explicitly.
    pub web_server_ip: Option<String>,
    pub dkim_public_key: Option<String>,
}

impl DomainConfig {
    /// Creates an unconfigured entry with the standard `mail.<domain>` host.
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            mail_subdomain: format!("{MAIL_SUBDOMAIN_LABEL}.{domain}"),
            mail_server_ip: None,
            web_server_ip: None,
            dkim_public_key: None,
        }
    }

    /// First label of the mail host (`mail` for `mail.bad.mn`).
    pub fn mail_label(&self) -> &str {
        self.mail_subdomain
            .split('.')
            .next()
            .unwrap_or(&self.mail_subdomain)
    }

    /// Returns true once a non-empty mail server IP has been set.
    pub fn is_configured(&self) -> bool {
        self.mail_server_ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }
}

/// Ordered set of managed domains and their settings.
///
/// The registry is a plain value owned by the generator, so independent
/// registries can coexist (tests build their own).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistry {
    entries: Vec<DomainConfig>,
}

impl DomainRegistry {
    /// Builds a registry managing exactly `domains`, in the given order.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<DomainConfig> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref();
            if entries.iter().all(|e| e.domain != domain) {
                entries.push(DomainConfig::new(domain));
            }
        }
        Self { entries }
    }

    /// Stores the settings for `domain`.
    ///
    /// `web_server_ip` defaults to `mail_server_ip`. The DKIM key is replaced
    /// wholesale, so omitting it clears a previously stored key. Empty strings
    /// count as not given.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnsupportedDomain` if `domain` is not managed.
    pub fn configure(
        &mut self,
        domain: &str,
        mail_server_ip: &str,
        web_server_ip: Option<&str>,
        dkim_public_key: Option<&str>,
    ) -> Result<(), GenerationError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.domain == domain)
            .ok_or_else(|| GenerationError::UnsupportedDomain(domain.to_string()))?;

        let mail_server_ip = non_empty(Some(mail_server_ip));
        entry.mail_server_ip = mail_server_ip.map(str::to_string);
        entry.web_server_ip = non_empty(web_server_ip)
            .or(mail_server_ip)
            .map(str::to_string);
        entry.dkim_public_key = non_empty(dkim_public_key).map(str::to_string);
        Ok(())
    }

    /// Looks up the settings for `domain`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnsupportedDomain` if `domain` is not managed.
    pub fn get(&self, domain: &str) -> Result<&DomainConfig, GenerationError> {
        self.entries
            .iter()
            .find(|e| e.domain == domain)
            .ok_or_else(|| GenerationError::UnsupportedDomain(domain.to_string()))
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.entries.iter().any(|e| e.domain == domain)
    }

    /// Managed domain names in registry order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.domain.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainConfig> {
        self.entries.iter()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new(SUPPORTED_DOMAINS.iter().copied())
    }
}
