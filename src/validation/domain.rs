//! Custom short-link domain validation.
//!
//! Customers bring their own domains (`go.brand.com`, `brand.co.il`) to serve
//! short links from. Input is accepted in whatever form users paste it
//! (`https://Brand.com:443/path`) and reduced to a bare lowercase hostname
//! before the gate checks run.

use std::collections::HashSet;
use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;

use super::lists::{RESERVED_DOMAINS, TWO_PART_TLDS};

/// Maximum length of a DNS name.
pub const DEFAULT_MAX_DOMAIN_LENGTH: usize = 253;

/// Maximum length of a single DNS label.
pub const MAX_LABEL_LENGTH: usize = 63;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://").expect("valid scheme regex"));

static IPV4_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("valid ipv4 regex"));

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid label regex"));

/// Per-call switches for [`validate_domain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOptions {
    pub max_length: usize,
    pub allow_localhost: bool,
    pub allow_ip: bool,
    pub allow_punycode: bool,
    pub allow_subdomains: bool,
}

impl Default for DomainOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_DOMAIN_LENGTH,
            allow_localhost: false,
            allow_ip: false,
            allow_punycode: false,
            allow_subdomains: true,
        }
    }
}

/// Reasons a domain is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Domain is required")]
    Empty,

    #[error("Domain is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("The domain {domain} is reserved and cannot be used")]
    Reserved { domain: String },

    #[error("localhost is not allowed")]
    Localhost,

    #[error("IP addresses are not allowed, please use a domain name")]
    IpAddress,

    #[error("Invalid IPv4 address: each octet must be between 0 and 255")]
    InvalidIpv4,

    #[error("Internationalized domains must be entered in punycode (xn--) form")]
    NonAscii,

    #[error("Punycode (xn--) domains are not allowed")]
    PunycodeNotAllowed,

    #[error("Domain contains the invalid character '{character}'")]
    InvalidCharacter { character: char },

    #[error("Domain contains an empty label (check for consecutive or leading dots)")]
    EmptyLabel,

    #[error("Domain label '{label}' is longer than {max} characters", max = MAX_LABEL_LENGTH)]
    LabelTooLong { label: String },

    #[error("Domain labels cannot start or end with a hyphen")]
    LabelHyphen,

    #[error("Domain must include a top-level domain (e.g. .com)")]
    MissingTld,

    #[error("Top-level domain must be at least 2 characters")]
    TldTooShort,

    #[error("Top-level domain must contain only letters")]
    InvalidTld,

    #[error("{suffix} is a registry suffix; add your domain name in front of it")]
    PublicSuffix { suffix: String },

    #[error("Subdomains are not allowed")]
    SubdomainNotAllowed,
}

/// Reference tables used by [`validate_domain_with`].
#[derive(Debug, Clone)]
pub struct DomainRules {
    pub reserved_domains: Vec<String>,
    pub two_part_tlds: HashSet<String>,
}

impl Default for DomainRules {
    fn default() -> Self {
        Self {
            reserved_domains: RESERVED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            two_part_tlds: TWO_PART_TLDS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl DomainRules {
    /// Returns the reserved domain `host` equals or is a subdomain of.
    pub fn reserved_parent(&self, host: &str) -> Option<&str> {
        self.reserved_domains
            .iter()
            .find(|reserved| {
                host == reserved.as_str()
                    || host
                        .strip_suffix(reserved.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .map(String::as_str)
    }

    /// Number of trailing labels that make up the registrable domain:
    /// 3 under a two-part TLD (`brand.co.il`), otherwise 2.
    pub fn registrable_label_count(&self, labels: &[&str]) -> usize {
        if labels.len() >= 2 {
            let suffix = labels[labels.len() - 2..].join(".");
            if self.two_part_tlds.contains(&suffix) {
                return 3;
            }
        }
        2
    }
}

static DEFAULT_RULES: LazyLock<DomainRules> = LazyLock::new(DomainRules::default);

/// Validates a domain with the built-in tables.
///
/// See [`validate_domain_with`].
pub fn validate_domain(input: &str, options: &DomainOptions) -> Result<String, DomainError> {
    validate_domain_with(input, options, &DEFAULT_RULES)
}

/// Reduces user input to a bare lowercase hostname.
///
/// Removes the scheme, credentials, path, query, fragment, port and a
/// trailing root dot. IPv6 literals lose their brackets.
pub fn sanitize_domain(input: &str) -> String {
    let mut host = SCHEME_RE.replace(input.trim(), "").into_owned();

    if let Some(end) = host.find(['/', '?', '#']) {
        host.truncate(end);
    }
    if let Some(at) = host.rfind('@') {
        host = host[at + 1..].to_string();
    }

    let host = if let Some(rest) = host.strip_prefix('[') {
        rest.split(']').next().unwrap_or(rest).to_string()
    } else if host.matches(':').count() == 1 {
        host.split(':').next().unwrap_or(&host).to_string()
    } else {
        host
    };

    host.trim_end_matches('.').to_lowercase()
}

/// Validates a custom short-link domain and returns its sanitized form.
///
/// # Gates (first failure wins)
///
/// 1. Non-empty input
/// 2. Sanitization (see [`sanitize_domain`])
/// 3. Length limit
/// 4. Reserved service domains and their subdomains
/// 5. `localhost` (only with `allow_localhost`)
/// 6. IPv4 / IPv6 literals (only with `allow_ip`)
/// 7. Character class `[a-z0-9.-]`, punycode policy
/// 8. Label shape
/// 9. TLD shape and registry-suffix awareness
/// 10. Subdomain policy
///
/// # Errors
///
/// Returns the first failing gate as a [`DomainError`].
pub fn validate_domain_with(
    input: &str,
    options: &DomainOptions,
    rules: &DomainRules,
) -> Result<String, DomainError> {
    if input.trim().is_empty() {
        return Err(DomainError::Empty);
    }

    let domain = sanitize_domain(input);
    if domain.is_empty() {
        return Err(DomainError::Empty);
    }

    if domain.chars().count() > options.max_length {
        return Err(DomainError::TooLong {
            max: options.max_length,
        });
    }

    if let Some(reserved) = rules.reserved_parent(&domain) {
        return Err(DomainError::Reserved {
            domain: reserved.to_string(),
        });
    }

    if domain == "localhost" {
        return if options.allow_localhost {
            Ok(domain)
        } else {
            Err(DomainError::Localhost)
        };
    }

    if IPV4_SHAPE_RE.is_match(&domain) {
        if !options.allow_ip {
            return Err(DomainError::IpAddress);
        }
        let octets_ok = domain.split('.').all(|octet| octet.parse::<u8>().is_ok());
        return if octets_ok {
            Ok(domain)
        } else {
            Err(DomainError::InvalidIpv4)
        };
    }

    if domain.contains(':') && domain.parse::<Ipv6Addr>().is_ok() {
        return if options.allow_ip {
            Ok(domain)
        } else {
            Err(DomainError::IpAddress)
        };
    }

    if !domain.is_ascii() {
        return Err(if options.allow_punycode {
            DomainError::NonAscii
        } else {
            let character = domain.chars().find(|c| !c.is_ascii()).unwrap_or('?');
            DomainError::InvalidCharacter { character }
        });
    }

    if let Some(character) = domain
        .chars()
        .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'))
    {
        return Err(DomainError::InvalidCharacter { character });
    }

    let labels: Vec<&str> = domain.split('.').collect();
    for label in &labels {
        if label.is_empty() {
            return Err(DomainError::EmptyLabel);
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(DomainError::LabelTooLong {
                label: label.to_string(),
            });
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainError::LabelHyphen);
        }
        if !LABEL_RE.is_match(label) {
            return Err(DomainError::InvalidCharacter {
                character: label.chars().next().unwrap_or('?'),
            });
        }
        if !options.allow_punycode && label.starts_with("xn--") {
            return Err(DomainError::PunycodeNotAllowed);
        }
    }

    if labels.len() < 2 {
        return Err(DomainError::MissingTld);
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 {
        return Err(DomainError::TldTooShort);
    }
    if !tld.starts_with("xn--") && !tld.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(DomainError::InvalidTld);
    }

    let registrable = rules.registrable_label_count(&labels);
    if labels.len() < registrable {
        return Err(DomainError::PublicSuffix {
            suffix: domain.clone(),
        });
    }

    if !options.allow_subdomains && labels.len() > registrable {
        return Err(DomainError::SubdomainNotAllowed);
    }

    Ok(domain)
}
