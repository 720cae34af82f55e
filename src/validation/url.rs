//! Destination URL validation.
//!
//! Runs before a URL is stored as a redirect target. Beyond syntax, it blocks
//! hostnames that are commonly used to impersonate well-known sites
//! (`paypal.com.xy`, `abc.google.com`).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::{Host, Url};
use validator::ValidateUrl;

use super::lists::{
    COMMON_SUBDOMAINS, GENERIC_TLDS, KNOWN_TLDS, LEGITIMATE_TLD_PAIRS, WELL_KNOWN_DOMAINS,
};

/// Schemes accepted for destination URLs.
pub const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "ftp", "ftps", "ws", "wss"];

/// Characters never accepted in a raw destination URL.
const FORBIDDEN_CHARACTERS: &[char] = &['<', '>', '{', '}', '`'];

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;
const MAX_SUSPICIOUS_SUBDOMAIN_LENGTH: usize = 3;

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):(.*)$").expect("valid scheme regex")
});

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9.-]+$").expect("valid hostname regex"));

/// Reasons a destination URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("URL is required")]
    Empty,

    #[error("URL cannot contain spaces")]
    ContainsWhitespace,

    #[error("URL contains the invalid character '{character}'")]
    InvalidCharacters { character: char },

    #[error("Protocol '{protocol}' is not allowed; use http, https, ftp, ftps, ws or wss")]
    UnsupportedProtocol { protocol: String },

    #[error("Invalid URL format: {reason}")]
    InvalidFormat { reason: String },

    #[error("URL must include a hostname")]
    MissingHostname,

    #[error("Invalid hostname")]
    InvalidHostname,

    #[error("Hostname cannot contain consecutive hyphens")]
    DoubleHyphen,

    #[error("Hostname labels cannot start or end with a hyphen")]
    LabelHyphen,

    #[error("Hostname must include a top-level domain (e.g. .com)")]
    MissingTld,

    #[error("Top-level domain must be at least 2 letters")]
    InvalidTld,

    #[error("Unknown top-level domain '.{tld}'")]
    UnknownTld { tld: String },

    #[error("Suspicious domain ending '.{suffix}'")]
    SuspiciousTld { suffix: String },

    #[error("Hostname is not a valid fully qualified domain name")]
    NotFqdn,

    #[error("Port must be between 1 and 65535")]
    InvalidPort,

    #[error("Suspicious subdomain on {host}")]
    SuspiciousSubdomain { host: String },
}

/// Reference tables used by [`validate_url_with`].
#[derive(Debug, Clone)]
pub struct UrlRules {
    pub known_tlds: HashSet<String>,
    pub generic_tlds: HashSet<String>,
    pub legitimate_pairs: HashSet<String>,
    pub well_known_domains: Vec<String>,
    pub common_subdomains: HashSet<String>,
}

fn owned_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for UrlRules {
    fn default() -> Self {
        Self {
            known_tlds: owned_set(KNOWN_TLDS),
            generic_tlds: owned_set(GENERIC_TLDS),
            legitimate_pairs: owned_set(LEGITIMATE_TLD_PAIRS),
            well_known_domains: WELL_KNOWN_DOMAINS.iter().map(|s| s.to_string()).collect(),
            common_subdomains: owned_set(COMMON_SUBDOMAINS),
        }
    }
}

static DEFAULT_RULES: LazyLock<UrlRules> = LazyLock::new(UrlRules::default);

/// Validates a destination URL with the built-in tables.
///
/// See [`validate_url_with`].
pub fn validate_url(input: &str) -> Result<String, UrlError> {
    validate_url_with(input, &DEFAULT_RULES)
}

/// Returns the explicit scheme of `input`, if it has one.
///
/// `host:port` forms (`localhost:3000`, `example.com:8080`) are not schemes.
fn explicit_scheme(input: &str) -> Option<String> {
    let caps = SCHEME_RE.captures(input)?;
    let scheme = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());

    if rest.starts_with("//") {
        return Some(scheme.to_ascii_lowercase());
    }
    let looks_like_port = rest.starts_with(|c: char| c.is_ascii_digit());
    if !scheme.contains('.') && !looks_like_port {
        return Some(scheme.to_ascii_lowercase());
    }
    None
}

/// Validates a destination URL and returns its normalized form.
///
/// The normalized form is the trimmed input, prefixed with `https://` when
/// no scheme was given.
///
/// # Errors
///
/// Returns the first failing rule as a [`UrlError`].
pub fn validate_url_with(input: &str, rules: &UrlRules) -> Result<String, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(UrlError::ContainsWhitespace);
    }

    if let Some(character) = trimmed.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
        return Err(UrlError::InvalidCharacters { character });
    }

    let candidate = match explicit_scheme(trimmed) {
        Some(protocol) if ALLOWED_PROTOCOLS.contains(&protocol.as_str()) => trimmed.to_string(),
        Some(protocol) => return Err(UrlError::UnsupportedProtocol { protocol }),
        None => format!("https://{trimmed}"),
    };

    let url = Url::parse(&candidate).map_err(|e| match e {
        url::ParseError::InvalidPort => UrlError::InvalidPort,
        url::ParseError::EmptyHost => UrlError::MissingHostname,
        other => UrlError::InvalidFormat {
            reason: other.to_string(),
        },
    })?;

    match url.host() {
        None => return Err(UrlError::MissingHostname),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        Some(Host::Domain(domain)) => {
            let host = domain.to_ascii_lowercase();
            if host.is_empty() {
                return Err(UrlError::MissingHostname);
            }
            if host != "localhost" {
                check_hostname(&host, rules)?;
            }
        }
    }

    if !candidate.as_str().validate_url() {
        return Err(UrlError::NotFqdn);
    }

    if url.port() == Some(0) {
        return Err(UrlError::InvalidPort);
    }

    if let Some(Host::Domain(domain)) = url.host() {
        check_well_known_subdomain(&domain.to_ascii_lowercase(), rules)?;
    }

    Ok(candidate)
}

fn check_hostname(host: &str, rules: &UrlRules) -> Result<(), UrlError> {
    if !HOSTNAME_RE.is_match(host) {
        return Err(UrlError::InvalidHostname);
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(UrlError::InvalidHostname);
    }

    for label in &labels {
        let body = label.strip_prefix("xn--").unwrap_or(label);
        if body.contains("--") {
            return Err(UrlError::DoubleHyphen);
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(UrlError::LabelHyphen);
        }
    }

    if labels.len() < 2 {
        return Err(UrlError::MissingTld);
    }

    let tld = labels[labels.len() - 1];
    let punycode_tld = tld.starts_with("xn--");
    if !punycode_tld && (tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic())) {
        return Err(UrlError::InvalidTld);
    }

    if labels.len() == 2 && !punycode_tld && !rules.known_tlds.contains(tld) {
        return Err(UrlError::UnknownTld {
            tld: tld.to_string(),
        });
    }

    if labels.len() >= 3 && tld.len() == 2 {
        let second = labels[labels.len() - 2];
        let suffix = format!("{second}.{tld}");
        if rules.generic_tlds.contains(second) && !rules.legitimate_pairs.contains(&suffix) {
            return Err(UrlError::SuspiciousTld { suffix });
        }
    }

    if host.len() > MAX_HOSTNAME_LENGTH || labels.iter().any(|l| l.len() > MAX_LABEL_LENGTH) {
        return Err(UrlError::NotFqdn);
    }

    Ok(())
}

fn check_well_known_subdomain(host: &str, rules: &UrlRules) -> Result<(), UrlError> {
    for known in &rules.well_known_domains {
        let Some(prefix) = host.strip_suffix(known.as_str()) else {
            continue;
        };
        let Some(subdomain) = prefix.strip_suffix('.') else {
            continue;
        };
        if subdomain.len() <= MAX_SUSPICIOUS_SUBDOMAIN_LENGTH
            && !rules.common_subdomains.contains(subdomain)
        {
            return Err(UrlError::SuspiciousSubdomain {
                host: known.clone(),
            });
        }
    }
    Ok(())
}
