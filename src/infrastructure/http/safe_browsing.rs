//! Google Safe Browsing v4 `threatMatches:find` client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::gateways::{GatewayError, ThreatLookup};

const SERVICE: &str = "Safe Browsing";
const DEFAULT_BASE_URL: &str = "https://safebrowsing.googleapis.com";

/// Threat lists every lookup is checked against.
pub const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo,
    threat_info: ThreatInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo {
    client_id: &'static str,
    client_version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'static [&'static str],
    platform_types: [&'static str; 1],
    threat_entry_types: [&'static str; 1],
    threat_entries: [ThreatEntry<'a>; 1],
}

#[derive(Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct FindResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: String,
}

/// Safe Browsing lookup client.
///
/// Without an API key every lookup returns [`GatewayError::NotConfigured`].
pub struct SafeBrowsingClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SafeBrowsingClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at another host, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body(url: &str) -> FindRequest<'_> {
        FindRequest {
            client: ClientInfo {
                client_id: env!("CARGO_PKG_NAME"),
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: &THREAT_TYPES,
                platform_types: ["ANY_PLATFORM"],
                threat_entry_types: ["URL"],
                threat_entries: [ThreatEntry { url }],
            },
        }
    }
}

/// Extracts the matched threat types from a `threatMatches:find` body.
///
/// An empty object means no match.
pub fn parse_threat_matches(body: &str) -> Result<Vec<String>, GatewayError> {
    let response: FindResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse {
            service: SERVICE,
            message: e.to_string(),
        })?;

    let mut threats: Vec<String> = response
        .matches
        .into_iter()
        .map(|m| m.threat_type)
        .collect();
    threats.sort();
    threats.dedup();
    Ok(threats)
}

#[async_trait]
impl ThreatLookup for SafeBrowsingClient {
    async fn find_threats(&self, url: &str) -> Result<Vec<String>, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::NotConfigured { service: SERVICE })?;

        let response = self
            .http
            .post(format!("{}/v4/threatMatches:find", self.base_url))
            .query(&[("key", api_key)])
            .json(&Self::request_body(url))
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited { service: SERVICE });
        }
        if !status.is_success() {
            return Err(GatewayError::Http {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| GatewayError::Transport {
            service: SERVICE,
            message: e.to_string(),
        })?;

        let threats = parse_threat_matches(&body)?;
        debug!(threats = threats.len(), "Safe Browsing lookup complete");
        Ok(threats)
    }
}
