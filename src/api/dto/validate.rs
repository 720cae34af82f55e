//! DTOs for the domain and URL validation endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::DomainOptions;

/// Optional switches for domain validation. Missing fields use the defaults
/// (no localhost, no IPs, no punycode, subdomains allowed).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DomainOptionsDto {
    #[validate(range(min = 4, max = 253))]
    pub max_length: Option<usize>,
    pub allow_localhost: Option<bool>,
    #[serde(alias = "allowIP")]
    pub allow_ip: Option<bool>,
    pub allow_punycode: Option<bool>,
    pub allow_subdomains: Option<bool>,
}

impl From<DomainOptionsDto> for DomainOptions {
    fn from(dto: DomainOptionsDto) -> Self {
        let defaults = DomainOptions::default();
        DomainOptions {
            max_length: dto.max_length.unwrap_or(defaults.max_length),
            allow_localhost: dto.allow_localhost.unwrap_or(defaults.allow_localhost),
            allow_ip: dto.allow_ip.unwrap_or(defaults.allow_ip),
            allow_punycode: dto.allow_punycode.unwrap_or(defaults.allow_punycode),
            allow_subdomains: dto.allow_subdomains.unwrap_or(defaults.allow_subdomains),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateDomainRequest {
    #[validate(length(max = 2048, message = "Domain input is too long"))]
    pub domain: String,

    #[serde(default)]
    #[validate(nested)]
    pub options: Option<DomainOptionsDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDomainResponse {
    pub is_valid: bool,
    pub error: Option<String>,
    pub sanitized: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateUrlRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateUrlResponse {
    pub is_valid: bool,
    pub error: Option<String>,
    pub normalized_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_options_defaults_and_overrides() {
        let dto: DomainOptionsDto =
            serde_json::from_str(r#"{"allowIP": true, "allowSubdomains": false}"#).unwrap();
        let options = DomainOptions::from(dto);

        assert!(options.allow_ip);
        assert!(!options.allow_subdomains);
        assert!(!options.allow_localhost);
        assert_eq!(options.max_length, 253);
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = serde_json::to_value(ValidateUrlResponse {
            is_valid: true,
            error: None,
            normalized_url: Some("https://example.com".to_string()),
        })
        .unwrap();

        assert_eq!(body["isValid"], true);
        assert!(body["error"].is_null());
        assert_eq!(body["normalizedUrl"], "https://example.com");
    }
}
