//! Contracts for third-party checks the service calls out to.
//!
//! Both gateways are advisory: callers treat every [`GatewayError`] as
//! "could not decide" and degrade instead of failing the request.

use async_trait::async_trait;

/// Why a third-party check did not produce an answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("{service} API key is not configured")]
    NotConfigured { service: &'static str },
    #[error("{service} rate limit exceeded")]
    RateLimited { service: &'static str },
    #[error("{service} returned HTTP {status}")]
    Http { service: &'static str, status: u16 },
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },
    #[error("{service} returned an unexpected response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
}

impl GatewayError {
    /// True for failures worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::NotConfigured { .. } | Self::InvalidResponse { .. } => false,
        }
    }
}

/// Looks up a URL in a threat-intelligence list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreatLookup: Send + Sync {
    /// Returns the threat types matching `url`; empty means no match.
    async fn find_threats(&self, url: &str) -> Result<Vec<String>, GatewayError>;
}

/// Highest-scoring attribute reported by a toxicity model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToxicityScore {
    pub attribute: String,
    pub value: f64,
}

/// Scores a short text for toxic content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    async fn score(&self, text: &str) -> Result<ToxicityScore, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(GatewayError::RateLimited { service: "x" }.is_transient());
        assert!(
            GatewayError::Http {
                service: "x",
                status: 503
            }
            .is_transient()
        );
        assert!(
            !GatewayError::Http {
                service: "x",
                status: 400
            }
            .is_transient()
        );
        assert!(!GatewayError::NotConfigured { service: "x" }.is_transient());
    }

    #[test]
    fn test_error_messages() {
        let err = GatewayError::Http {
            service: "Perspective",
            status: 500,
        };
        assert_eq!(err.to_string(), "Perspective returned HTTP 500");
    }
}
