//! Content moderation for user-chosen slugs.
//!
//! Order of checks: local blocked terms, the verdict cache, then the remote
//! toxicity model with exponential backoff. The remote model is advisory:
//! when it cannot answer the verdict is [`ModerationVerdict::Uncertain`] and
//! the caller decides whether to let the slug through.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::gateways::{GatewayError, ToxicityScorer};
use crate::infrastructure::cache::VerdictCache;
use crate::validation::lists::{BLOCKED_SUBSTRINGS, BLOCKED_WORDS};

/// Outcome of a moderation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModerationVerdict {
    Allowed,
    Blocked { reason: String },
    /// The check could not complete; the slug is let through.
    Uncertain { reason: String },
}

impl ModerationVerdict {
    /// False only for [`ModerationVerdict::Blocked`].
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Blocked { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Blocked { .. } => "blocked",
            Self::Uncertain { .. } => "uncertain",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Blocked { reason } | Self::Uncertain { reason } => Some(reason),
        }
    }
}

/// Blocked-term tables.
#[derive(Debug, Clone)]
pub struct BlockedTerms {
    /// Rejected wherever they appear, hyphens ignored.
    pub substrings: Vec<String>,
    /// Rejected only as a whole hyphen-separated word.
    pub words: Vec<String>,
}

impl Default for BlockedTerms {
    fn default() -> Self {
        Self {
            substrings: BLOCKED_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
            words: BLOCKED_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BlockedTerms {
    /// Returns the first blocked term found in `slug`.
    pub fn find_in(&self, slug: &str) -> Option<&str> {
        let slug = slug.to_ascii_lowercase();
        let collapsed: String = slug.chars().filter(|c| *c != '-').collect();

        if let Some(term) = self
            .substrings
            .iter()
            .find(|term| collapsed.contains(term.as_str()))
        {
            return Some(term);
        }

        slug.split('-').find_map(|part| {
            self.words
                .iter()
                .find(|word| word.as_str() == part)
                .map(String::as_str)
        })
    }
}

/// Tuning knobs for [`ModerationService`].
#[derive(Debug, Clone)]
pub struct ModerationSettings {
    /// Score at or above which a slug is blocked.
    pub threshold: f64,
    /// Retries after the first remote call.
    pub max_retries: usize,
    pub cache_ttl_seconds: u64,
    pub base_backoff: Duration,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            max_retries: 3,
            cache_ttl_seconds: 3600,
            base_backoff: Duration::from_millis(100),
        }
    }
}

pub struct ModerationService {
    scorer: Arc<dyn ToxicityScorer>,
    cache: Arc<dyn VerdictCache>,
    terms: BlockedTerms,
    settings: ModerationSettings,
}

impl ModerationService {
    pub fn new(
        scorer: Arc<dyn ToxicityScorer>,
        cache: Arc<dyn VerdictCache>,
        terms: BlockedTerms,
        settings: ModerationSettings,
    ) -> Self {
        Self {
            scorer,
            cache,
            terms,
            settings,
        }
    }

    fn cache_key(slug: &str) -> String {
        format!("slug:{slug}")
    }

    /// Moderates a normalized slug.
    ///
    /// Never fails: remote errors, rate limits and a missing API key all
    /// yield [`ModerationVerdict::Uncertain`]. Only definitive verdicts are
    /// cached.
    pub async fn moderate(&self, slug: &str) -> ModerationVerdict {
        if let Some(term) = self.terms.find_in(slug) {
            tracing::info!(slug = %slug, "Slug blocked by local term list");
            metrics::counter!("moderation_verdicts_total", "verdict" => "blocked_local")
                .increment(1);
            return ModerationVerdict::Blocked {
                reason: format!("Slug contains blocked term '{term}'"),
            };
        }

        let key = Self::cache_key(slug);
        if let Ok(Some(cached)) = self.cache.get_verdict(&key).await {
            match serde_json::from_str::<ModerationVerdict>(&cached) {
                Ok(verdict) => return verdict,
                Err(e) => tracing::warn!("Discarding unreadable cached verdict for {}: {}", slug, e),
            }
        }

        let verdict = self.score_remote(slug).await;
        metrics::counter!("moderation_verdicts_total", "verdict" => verdict.status())
            .increment(1);

        if !matches!(verdict, ModerationVerdict::Uncertain { .. }) {
            match serde_json::to_string(&verdict) {
                Ok(encoded) => {
                    if let Err(e) = self
                        .cache
                        .set_verdict(&key, &encoded, Some(self.settings.cache_ttl_seconds))
                        .await
                    {
                        tracing::warn!("Failed to cache verdict for {}: {}", slug, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to encode verdict for {}: {}", slug, e),
            }
        }

        verdict
    }

    async fn score_remote(&self, slug: &str) -> ModerationVerdict {
        let text = slug.replace('-', " ");
        // Delays of 2x, 4x, 8x ... the base backoff.
        let base_millis = self.settings.base_backoff.as_millis().max(1) as u64;
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(base_millis)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.settings.max_retries);

        let result = RetryIf::spawn(
            strategy,
            || {
                let scorer = self.scorer.clone();
                let text = text.clone();
                async move { scorer.score(&text).await }
            },
            GatewayError::is_transient,
        )
        .await;

        match result {
            Ok(score) if score.value >= self.settings.threshold => {
                tracing::info!(
                    slug = %slug,
                    attribute = %score.attribute,
                    score = score.value,
                    "Slug blocked by toxicity model"
                );
                ModerationVerdict::Blocked {
                    reason: format!(
                        "Slug flagged as {} ({:.2})",
                        score.attribute.to_lowercase(),
                        score.value
                    ),
                }
            }
            Ok(_) => ModerationVerdict::Allowed,
            Err(GatewayError::NotConfigured { .. }) => {
                tracing::debug!("Toxicity model not configured, skipping remote moderation");
                ModerationVerdict::Uncertain {
                    reason: "Moderation service is not configured".to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(slug = %slug, "Remote moderation failed: {}", e);
                ModerationVerdict::Uncertain {
                    reason: format!("Moderation check unavailable: {e}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{MockToxicityScorer, ToxicityScore};
    use crate::infrastructure::cache::{MemoryCache, MockVerdictCache};

    fn settings() -> ModerationSettings {
        ModerationSettings {
            threshold: 0.7,
            max_retries: 2,
            cache_ttl_seconds: 60,
            base_backoff: Duration::from_millis(1),
        }
    }

    fn score(value: f64) -> ToxicityScore {
        ToxicityScore {
            attribute: "TOXICITY".to_string(),
            value,
        }
    }

    fn service(scorer: MockToxicityScorer, cache: Arc<dyn VerdictCache>) -> ModerationService {
        ModerationService::new(Arc::new(scorer), cache, BlockedTerms::default(), settings())
    }

    #[test]
    fn test_blocked_terms_substring_ignores_hyphens() {
        let terms = BlockedTerms::default();
        assert_eq!(terms.find_in("hot-porn-deals"), Some("porn"));
        assert_eq!(terms.find_in("p-o-r-n"), Some("porn"));
    }

    #[test]
    fn test_blocked_words_match_whole_words_only() {
        let terms = BlockedTerms::default();
        assert_eq!(terms.find_in("kill-bill"), Some("kill"));
        assert_eq!(terms.find_in("skills"), None);
        assert_eq!(terms.find_in("classic-cars"), None);
        assert_eq!(terms.find_in("diet-plan"), None);
    }

    #[tokio::test]
    async fn test_local_block_skips_remote_and_cache() {
        let mut scorer = MockToxicityScorer::new();
        scorer.expect_score().never();
        let mut cache = MockVerdictCache::new();
        cache.expect_get_verdict().never();

        let verdict = service(scorer, Arc::new(cache)).moderate("porn-hub").await;

        assert!(matches!(verdict, ModerationVerdict::Blocked { .. }));
        assert!(!verdict.is_allowed());
    }

    #[tokio::test]
    async fn test_remote_allowed_is_cached() {
        let mut scorer = MockToxicityScorer::new();
        scorer
            .expect_score()
            .withf(|text| text == "summer sale")
            .times(1)
            .returning(|_| Ok(score(0.1)));

        let cache = Arc::new(MemoryCache::new(10, 60));
        let service = service(scorer, cache.clone());

        assert_eq!(service.moderate("summer-sale").await, ModerationVerdict::Allowed);
        assert_eq!(service.moderate("summer-sale").await, ModerationVerdict::Allowed);
        assert!(cache.get_verdict("slug:summer-sale").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remote_score_above_threshold_blocks() {
        let mut scorer = MockToxicityScorer::new();
        scorer.expect_score().returning(|_| Ok(score(0.92)));

        let verdict = service(scorer, Arc::new(MemoryCache::new(10, 60)))
            .moderate("rude-word")
            .await;

        match verdict {
            ModerationVerdict::Blocked { reason } => assert!(reason.contains("toxicity")),
            other => panic!("expected blocked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried_then_uncertain() {
        let mut scorer = MockToxicityScorer::new();
        scorer
            .expect_score()
            .times(3)
            .returning(|_| Err(GatewayError::RateLimited { service: "Perspective" }));

        let cache = Arc::new(MemoryCache::new(10, 60));
        let verdict = service(scorer, cache.clone()).moderate("promo-one").await;

        assert!(matches!(verdict, ModerationVerdict::Uncertain { .. }));
        assert!(verdict.is_allowed());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let mut scorer = MockToxicityScorer::new();
        let mut seq = mockall::Sequence::new();
        scorer
            .expect_score()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(GatewayError::Http {
                    service: "Perspective",
                    status: 503,
                })
            });
        scorer
            .expect_score()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(score(0.05)));

        let verdict = service(scorer, Arc::new(MemoryCache::new(10, 60)))
            .moderate("promo-two")
            .await;

        assert_eq!(verdict, ModerationVerdict::Allowed);
    }

    #[tokio::test]
    async fn test_missing_key_is_uncertain_without_retry() {
        let mut scorer = MockToxicityScorer::new();
        scorer
            .expect_score()
            .times(1)
            .returning(|_| Err(GatewayError::NotConfigured { service: "Perspective" }));

        let verdict = service(scorer, Arc::new(MemoryCache::new(10, 60)))
            .moderate("promo-three")
            .await;

        assert_eq!(verdict.status(), "uncertain");
    }

    #[tokio::test]
    async fn test_cached_verdict_short_circuits_remote() {
        let mut scorer = MockToxicityScorer::new();
        scorer.expect_score().never();

        let cache = Arc::new(MemoryCache::new(10, 60));
        cache
            .set_verdict(
                "slug:flagged",
                r#"{"status":"blocked","reason":"cached"}"#,
                None,
            )
            .await
            .unwrap();

        let verdict = service(scorer, cache).moderate("flagged").await;

        assert_eq!(
            verdict,
            ModerationVerdict::Blocked {
                reason: "cached".to_string()
            }
        );
    }
}
