//! Background worker that persists click events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Total insert attempts per click, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Drains the click channel until every sender is dropped.
///
/// Each event is inserted with up to [`MAX_ATTEMPTS`] attempts and jittered
/// exponential backoff. A click that still fails is logged and dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(event) = rx.recv().await {
        let slug = event.slug.clone();
        let domain = event.domain.clone();
        let click: NewClick = event.into();

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let result = Retry::spawn(strategy, || {
            let clicks = clicks.clone();
            let click = click.clone();
            async move { clicks.insert_click(click).await }
        })
        .await;

        match result {
            Ok(()) => {
                metrics::counter!("clicks_recorded_total").increment(1);
                tracing::debug!(slug = %slug, domain = %domain, "Click recorded");
            }
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::error!(
                    slug = %slug,
                    domain = %domain,
                    error = %e,
                    "Failed to record click after {} attempts",
                    MAX_ATTEMPTS
                );
            }
        }
    }

    tracing::info!("Click worker stopped");
}
