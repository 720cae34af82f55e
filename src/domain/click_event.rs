//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// A redirect that has been served and still needs to be recorded.
///
/// Sent from the redirect handler to the background worker over a bounded
/// channel, so the 301 never waits on the database. The resolved link id is
/// carried along, the worker does no lookups.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub slug: String,
    pub domain: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     7,
    ///     "promo1".to_string(),
    ///     "glynk.to".to_string(),
    ///     Some("203.0.113.7".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     None,
    /// );
    /// ```
    pub fn new(
        link_id: i64,
        slug: String,
        domain: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            slug,
            domain,
            clicked_at: Utc::now(),
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            link_id: event.link_id,
            slug: event.slug,
            domain: event.domain,
            clicked_at: event.clicked_at,
            user_agent: event.user_agent,
            referer: event.referer,
            ip: event.ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            7,
            "promo1".to_string(),
            "glynk.to".to_string(),
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0"),
            Some("https://instagram.com"),
        );

        assert_eq!(event.link_id, 7);
        assert_eq!(event.slug, "promo1");
        assert_eq!(event.domain, "glynk.to");
        assert_eq!(event.ip, Some("192.168.1.1".to_string()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.referer, Some("https://instagram.com".to_string()));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new(1, "abc".to_string(), "d.com".to_string(), None, None, None);

        assert!(event.ip.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.referer.is_none());
    }

    #[test]
    fn test_into_new_click_keeps_fields() {
        let event = ClickEvent::new(
            3,
            "sale".to_string(),
            "go.shop.com".to_string(),
            Some("10.0.0.1".to_string()),
            Some("Safari"),
            None,
        );
        let clicked_at = event.clicked_at;

        let click: NewClick = event.into();

        assert_eq!(click.link_id, 3);
        assert_eq!(click.slug, "sale");
        assert_eq!(click.domain, "go.shop.com");
        assert_eq!(click.clicked_at, clicked_at);
        assert_eq!(click.user_agent.as_deref(), Some("Safari"));
        assert_eq!(click.ip.as_deref(), Some("10.0.0.1"));
    }
}
