//! Request metadata extraction: serving domain and client IP.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

/// Reduces a `Host` header value to the domain links are stored under.
///
/// Strips the port (IPv6 brackets are kept intact), lowercases and removes a
/// single leading `www.`. Returns `None` for an empty host.
pub fn normalize_host(host: &str) -> Option<String> {
    let host = host.trim();

    let without_port = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    let lowered = without_port.trim_end_matches('.').to_ascii_lowercase();
    let domain = lowered.strip_prefix("www.").unwrap_or(&lowered);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// Extracts the serving domain from the `Host` header.
///
/// Returns `None` if the header is missing, not valid UTF-8, or empty.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "WWW.Glynk.to:8080".parse().unwrap());
///
/// assert_eq!(extract_domain_from_headers(&headers).as_deref(), Some("glynk.to"));
/// ```
pub fn extract_domain_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(normalize_host)
}

/// Determines the client IP for click logging.
///
/// Proxy headers are only trusted with `behind_proxy`; the first
/// `X-Forwarded-For` entry wins over `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_extract_domain_simple() {
        let headers = headers_with_host("glynk.to");
        assert_eq!(extract_domain_from_headers(&headers).as_deref(), Some("glynk.to"));
    }

    #[test]
    fn test_extract_domain_strips_port_and_www() {
        let headers = headers_with_host("WWW.Brand.com:3000");
        assert_eq!(extract_domain_from_headers(&headers).as_deref(), Some("brand.com"));
    }

    #[test]
    fn test_only_leading_www_is_stripped() {
        assert_eq!(normalize_host("go.www.brand.com").as_deref(), Some("go.www.brand.com"));
        assert_eq!(normalize_host("www.www.brand.com").as_deref(), Some("www.brand.com"));
    }

    #[test]
    fn test_extract_domain_localhost_with_port() {
        assert_eq!(normalize_host("localhost:8080").as_deref(), Some("localhost"));
    }

    #[test]
    fn test_extract_domain_ipv6_with_port() {
        assert_eq!(normalize_host("[::1]:8080").as_deref(), Some("[::1]"));
    }

    #[test]
    fn test_extract_domain_missing_or_empty() {
        assert!(extract_domain_from_headers(&HeaderMap::new()).is_none());
        assert!(normalize_host(":8080").is_none());
    }

    #[test]
    fn test_client_ip_from_peer() {
        let peer: SocketAddr = "203.0.113.7:5555".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));

        assert_eq!(
            client_ip(&headers, Some(peer), false).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_client_ip_behind_proxy() {
        let peer: SocketAddr = "127.0.0.1:5555".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("198.51.100.4, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.9.9.9"));

        assert_eq!(
            client_ip(&headers, Some(peer), true).as_deref(),
            Some("198.51.100.4")
        );

        headers.remove("x-forwarded-for");
        assert_eq!(client_ip(&headers, Some(peer), true).as_deref(), Some("10.9.9.9"));

        headers.remove("x-real-ip");
        assert_eq!(client_ip(&headers, Some(peer), true).as_deref(), Some("127.0.0.1"));
    }
}
