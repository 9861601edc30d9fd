//! Time-bound cache of popularity-ranked tags.
//!
//! The cache is an explicit, injectable object rather than module-level
//! state: the offer source and the clock are both injected so tests control
//! time and no global state leaks between test cases. A refresh scans every
//! offer's tag list, trims and lower-cases each tag, counts occurrences,
//! and ranks by descending count (ties alphabetical, for deterministic
//! output). When the upstream fetch fails the cache answers with a fixed
//! default vocabulary instead, so the search UI always has something to show.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use super::ports::OfferSource;

/// Default validity window for a refreshed tag table.
pub const DEFAULT_TAG_TTL: Duration = Duration::from_secs(5 * 60);

/// Vocabulary served when the upstream source cannot be reached.
pub const DEFAULT_TAGS: [&str; 16] = [
    "design",
    "react",
    "typescript",
    "figma",
    "ui-kit",
    "formation",
    "marketing",
    "seo",
    "consultation",
    "développement",
    "apple",
    "samsung",
    "neuf",
    "occasion",
    "garantie",
    "livraison",
];

struct CachedTags {
    ranked: Vec<String>,
    refreshed_at: DateTime<Utc>,
}

/// Process-wide popular-tag cache with TTL-based refresh.
pub struct TagCache {
    source: Arc<dyn OfferSource>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    state: RwLock<Option<CachedTags>>,
}

impl TagCache {
    /// Build a cache over `source` using `clock` for TTL arithmetic.
    #[must_use]
    pub fn new(source: Arc<dyn OfferSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            state: RwLock::new(None),
        }
    }

    /// The `limit` most popular tags.
    ///
    /// Serves the cached table while it is within its TTL; `force_refresh`
    /// or expiry triggers a refetch. A failed refetch falls back to
    /// [`DEFAULT_TAGS`] without disturbing any previously cached table.
    pub async fn popular_tags(&self, limit: usize, force_refresh: bool) -> Vec<String> {
        if !force_refresh {
            if let Some(cached) = self.fresh_snapshot() {
                return truncated(cached, limit);
            }
        }

        match self.refresh().await {
            Some(ranked) => truncated(ranked, limit),
            None => truncated(
                DEFAULT_TAGS.iter().map(|tag| (*tag).to_owned()).collect(),
                limit,
            ),
        }
    }

    /// Drop the cached table so the next read refetches.
    ///
    /// Callable after any mutation that could change the tag distribution.
    pub fn invalidate(&self) {
        if let Ok(mut state) = self.state.write() {
            *state = None;
        }
    }

    /// Refetch and rank tags, replacing the cached table on success.
    ///
    /// Returns the fresh ranking, or `None` when the source failed.
    pub async fn refresh(&self) -> Option<Vec<String>> {
        let offers = match self.source.fetch_offers().await {
            Ok(offers) => offers,
            Err(error) => {
                warn!(%error, "tag refresh failed, keeping previous table");
                return None;
            }
        };

        let mut counts: HashMap<String, usize> = HashMap::new();
        for offer in &offers {
            for tag in &offer.tags {
                let tag = tag.trim().to_lowercase();
                if !tag.is_empty() {
                    *counts.entry(tag).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let ranked: Vec<String> = ranked.into_iter().map(|(tag, _)| tag).collect();

        debug!(tags = ranked.len(), offers = offers.len(), "tag table refreshed");
        if let Ok(mut state) = self.state.write() {
            *state = Some(CachedTags {
                ranked: ranked.clone(),
                refreshed_at: self.clock.utc(),
            });
        }
        Some(ranked)
    }

    fn fresh_snapshot(&self) -> Option<Vec<String>> {
        let state = self.state.read().ok()?;
        let cached = state.as_ref()?;
        let age = self.clock.utc() - cached.refreshed_at;
        (age < self.ttl).then(|| cached.ranked.clone())
    }
}

fn truncated(mut tags: Vec<String>, limit: usize) -> Vec<String> {
    tags.truncate(limit);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::offer::RawOffer;
    use crate::domain::ports::OfferSourceError;
    use async_trait::async_trait;
    use chrono::{Local, TimeZone};
    use rstest::rstest;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test clock that only moves when told to.
    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn starting_at(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        fn advance_seconds(&self, seconds: i64) {
            let mut now = self.0.lock().expect("clock mutex");
            *now += TimeDelta::seconds(seconds);
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex")
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn working() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn broken() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OfferSource for CountingSource {
        async fn fetch_offers(&self) -> Result<Vec<RawOffer>, OfferSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(OfferSourceError::transport("down for maintenance"));
            }
            Ok(vec![
                RawOffer {
                    tags: vec!["Design".to_owned(), "figma".to_owned()],
                    ..RawOffer::default()
                },
                RawOffer {
                    tags: vec!["design".to_owned(), "react".to_owned()],
                    ..RawOffer::default()
                },
                RawOffer {
                    tags: vec![" design ".to_owned(), "seo".to_owned()],
                    ..RawOffer::default()
                },
            ])
        }

        async fn fetch_offer(&self, _id: u64) -> Result<Option<RawOffer>, OfferSourceError> {
            Ok(None)
        }
    }

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn cache_over(source: Arc<CountingSource>, clock: Arc<MutableClock>) -> TagCache {
        TagCache::new(source, clock, DEFAULT_TAG_TTL)
    }

    #[rstest]
    #[tokio::test]
    async fn ranks_by_count_then_alphabetically() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(source, clock);

        let tags = cache.popular_tags(10, false).await;
        assert_eq!(
            tags,
            vec![
                "design".to_owned(),
                "figma".to_owned(),
                "react".to_owned(),
                "seo".to_owned(),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn second_read_within_ttl_hits_the_cache() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(Arc::clone(&source), clock);

        let first = cache.popular_tags(5, false).await;
        let second = cache.popular_tags(5, false).await;

        assert_eq!(first, second);
        assert_eq!(source.call_count(), 1, "second read must not refetch");
    }

    #[rstest]
    #[tokio::test]
    async fn ttl_expiry_triggers_a_refetch() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(Arc::clone(&source), Arc::clone(&clock));

        let _ = cache.popular_tags(5, false).await;
        clock.advance_seconds(301);
        let _ = cache.popular_tags(5, false).await;

        assert_eq!(source.call_count(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn force_refresh_refetches_even_inside_ttl() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(Arc::clone(&source), clock);

        let _ = cache.popular_tags(5, false).await;
        let _ = cache.popular_tags(5, true).await;

        assert_eq!(source.call_count(), 2, "force refresh must refetch exactly once");
    }

    #[rstest]
    #[tokio::test]
    async fn invalidate_drops_the_table() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(Arc::clone(&source), clock);

        let _ = cache.popular_tags(5, false).await;
        cache.invalidate();
        let _ = cache.popular_tags(5, false).await;

        assert_eq!(source.call_count(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_fetch_serves_the_default_vocabulary() {
        let source = Arc::new(CountingSource::broken());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(source, clock);

        let tags = cache.popular_tags(5, false).await;
        assert_eq!(
            tags,
            DEFAULT_TAGS[..5]
                .iter()
                .map(|tag| (*tag).to_owned())
                .collect::<Vec<_>>()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn limit_truncates_the_ranking() {
        let source = Arc::new(CountingSource::working());
        let clock = Arc::new(MutableClock::starting_at(fixture_now()));
        let cache = cache_over(source, clock);

        let tags = cache.popular_tags(2, false).await;
        assert_eq!(tags, vec!["design".to_owned(), "figma".to_owned()]);
    }
}
