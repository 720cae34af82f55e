//! Google Perspective `comments:analyze` client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::domain::gateways::{GatewayError, ToxicityScore, ToxicityScorer};

const SERVICE: &str = "Perspective";
const DEFAULT_BASE_URL: &str = "https://commentanalyzer.googleapis.com";

/// Attributes requested for every slug.
pub const ATTRIBUTES: [&str; 5] = [
    "TOXICITY",
    "SEVERE_TOXICITY",
    "PROFANITY",
    "SEXUALLY_EXPLICIT",
    "INSULT",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    #[serde(default)]
    attribute_scores: HashMap<String, AttributeScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Debug, Deserialize)]
struct SummaryScore {
    value: f64,
}

pub struct PerspectiveClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PerspectiveClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body(text: &str) -> Value {
        let requested: serde_json::Map<String, Value> = ATTRIBUTES
            .iter()
            .map(|a| (a.to_string(), json!({})))
            .collect();

        json!({
            "comment": { "text": text },
            "languages": ["en"],
            "requestedAttributes": requested,
            "doNotStore": true,
        })
    }
}

/// Returns the highest-scoring attribute of a `comments:analyze` body.
pub fn parse_highest_score(body: &str) -> Result<ToxicityScore, GatewayError> {
    let response: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse {
            service: SERVICE,
            message: e.to_string(),
        })?;

    response
        .attribute_scores
        .into_iter()
        .map(|(attribute, score)| ToxicityScore {
            attribute,
            value: score.summary_score.value,
        })
        .max_by(|a, b| a.value.total_cmp(&b.value))
        .ok_or_else(|| GatewayError::InvalidResponse {
            service: SERVICE,
            message: "no attribute scores".to_string(),
        })
}

#[async_trait]
impl ToxicityScorer for PerspectiveClient {
    async fn score(&self, text: &str) -> Result<ToxicityScore, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::NotConfigured { service: SERVICE })?;

        let response = self
            .http
            .post(format!("{}/v1alpha1/comments:analyze", self.base_url))
            .query(&[("key", api_key)])
            .json(&Self::request_body(text))
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

        parse_highest_score(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picks_highest_attribute() {
        let body = r#"{
            "attributeScores": {
                "TOXICITY": {"summaryScore": {"value": 0.21, "type": "PROBABILITY"}},
                "PROFANITY": {"summaryScore": {"value": 0.83, "type": "PROBABILITY"}},
                "INSULT": {"summaryScore": {"value": 0.05}}
            },
            "languages": ["en"]
        }"#;

        let score = parse_highest_score(body).unwrap();
        assert_eq!(score.attribute, "PROFANITY");
        assert!((score.value - 0.83).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_without_scores_is_invalid() {
        let err = parse_highest_score(r#"{"languages": ["en"]}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse { .. }));
    }

    #[test]
    fn test_request_body_lists_attributes() {
        let body = PerspectiveClient::request_body("summer sale");

        assert_eq!(body["comment"]["text"], "summer sale");
        assert_eq!(body["doNotStore"], true);
        for attribute in ATTRIBUTES {
            assert!(body["requestedAttributes"].get(attribute).is_some());
        }
    }

    #[tokio::test]
    async fn test_empty_key_is_not_configured() {
        let client = PerspectiveClient::new(Client::new(), Some(String::new()));
        let err = client.score("hello").await.unwrap_err();
        assert_eq!(err, GatewayError::NotConfigured { service: SERVICE });
    }
}
