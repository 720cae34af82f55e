//! Short link resolution and redirect target construction.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::json;
use url::{Url, form_urlencoded};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

static SLUG_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9-]{3,30}$").expect("valid slug path regex"));

/// Extracts the slug from a request path.
///
/// Drops the leading slash, query and fragment, then rejects the empty path,
/// `index.html`, anything under `api/` and anything that is not 3-30
/// characters of `[a-z0-9-]`. The slug is returned lowercased.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_slug("/Promo1?ref=x").as_deref(), Some("promo1"));
/// assert_eq!(extract_slug("/api/health"), None);
/// ```
pub fn extract_slug(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let candidate = path.strip_prefix('/').unwrap_or(path);

    if candidate.is_empty()
        || candidate.eq_ignore_ascii_case("index.html")
        || candidate.to_ascii_lowercase().starts_with("api/")
        || !SLUG_PATH_RE.is_match(candidate)
    {
        return None;
    }

    Some(candidate.to_ascii_lowercase())
}

/// Builds the redirect target for `link`.
///
/// UTM values stored on the link replace any value already present in the
/// target URL. With pass-through enabled, every inbound query parameter is
/// copied as well, except the UTM keys the link itself sets, so stored
/// campaign values always win.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored target URL cannot be parsed.
pub fn build_target_url(link: &Link, inbound_query: Option<&str>) -> Result<String, AppError> {
    let mut target = Url::parse(link.target_url.trim()).map_err(|e| {
        tracing::error!(
            slug = %link.slug,
            domain = %link.domain,
            "Stored target URL is invalid: {}",
            e
        );
        AppError::internal("Invalid target URL", json!({ "slug": link.slug }))
    })?;

    let utm = link.utm_parameters();
    let inbound: Vec<(String, String)> = if link.parameter_pass_through {
        inbound_query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    if utm.is_empty() && inbound.is_empty() {
        return Ok(target.into());
    }

    let mut params: Vec<(String, String)> = target.query_pairs().into_owned().collect();

    for (key, value) in &utm {
        set_param(&mut params, key, value);
    }

    for (key, value) in &inbound {
        if utm.iter().any(|(utm_key, _)| utm_key == key) {
            continue;
        }
        set_param(&mut params, key, value);
    }

    target.query_pairs_mut().clear().extend_pairs(&params);
    Ok(target.into())
}

/// Sets `key` to `value`: the first occurrence is overwritten in place and
/// later duplicates are removed; a new key is appended.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter().position(|(k, _)| k == key) {
        Some(first) => {
            params[first].1 = value.to_string();
            let mut index = 0;
            params.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => params.push((key.to_string(), value.to_string())),
    }
}

/// Resolves slugs to active links.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    loose_slug_fallback: bool,
}

impl RedirectService {
    pub fn new(links: Arc<dyn LinkRepository>, loose_slug_fallback: bool) -> Self {
        Self {
            links,
            loose_slug_fallback,
        }
    }

    /// Whether slugs may resolve on a domain other than the requested one.
    pub fn loose_slug_fallback(&self) -> bool {
        self.loose_slug_fallback
    }

    /// Finds the active link for `slug` on `domain`.
    ///
    /// With the loose fallback enabled, a miss on the exact domain retries by
    /// slug alone and takes the first active candidate on any domain.
    ///
    /// # Errors
    ///
    /// Propagates repository errors; nothing is retried.
    pub async fn resolve(&self, slug: &str, domain: &str) -> Result<Option<Link>, AppError> {
        if let Some(link) = self.links.find_active(slug, domain).await? {
            return Ok(Some(link));
        }

        if !self.loose_slug_fallback {
            return Ok(None);
        }

        let candidate = self
            .links
            .find_active_by_slug(slug)
            .await?
            .into_iter()
            .find(Link::is_active);

        if let Some(ref link) = candidate {
            tracing::warn!(
                slug = %slug,
                requested_domain = %domain,
                link_domain = %link.domain,
                "Resolved slug through loose fallback on a different domain"
            );
            metrics::counter!("redirect_loose_fallback_total").increment(1);
        }

        Ok(candidate)
    }
}
