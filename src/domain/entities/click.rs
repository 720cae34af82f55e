//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// Input data for recording a click on a short link.
///
/// All client metadata is optional: headers may be missing and the service
/// may run behind proxies that strip them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub link_id: i64,
    pub slug: String,
    pub domain: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}
