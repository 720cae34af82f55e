//! Outbound HTTP clients for third-party checks.
//!
//! Both clients share one `reqwest::Client` built by [`build_http_client`].

pub mod perspective;
pub mod safe_browsing;

pub use perspective::PerspectiveClient;
pub use safe_browsing::SafeBrowsingClient;

use std::time::Duration;

/// Builds the shared HTTP client with a per-request timeout.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
