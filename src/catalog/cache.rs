use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::catalog::record::BookRecord;
use crate::fetcher::FetchError;

/// How long a catalog snapshot stays fresh before a refetch is attempted.
pub const CATALOG_TTL: Duration = Duration::from_secs(300);

/// Something that can produce a complete catalog. The production source is
/// `ListingWalker`; tests inject a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<BookRecord>, FetchError>;
}

struct Slot {
    books: Arc<Vec<BookRecord>>,
    fetched_at: Instant,
    refreshed_at: DateTime<Utc>,
}

/// Time-bounded cache over a `CatalogSource`.
///
/// The slot is overwritten on every refresh, win or lose: a failed fetch
/// caches an empty list for a full TTL window, trading accuracy for not
/// retrying a broken upstream on every request. Refreshes run outside the
/// write lock, so two concurrent stale readers may both refetch; the last
/// writer wins and in-flight readers keep whichever `Arc` snapshot they
/// already hold.
pub struct CatalogCache {
    source: Box<dyn CatalogSource>,
    ttl: Duration,
    slot: RwLock<Option<Slot>>,
}

impl CatalogCache {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self::with_ttl(source, CATALOG_TTL)
    }

    pub fn with_ttl(source: Box<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Freshness-checked catalog access.
    pub async fn get_or_refresh(&self) -> Arc<Vec<BookRecord>> {
        self.get_or_refresh_at(Instant::now()).await
    }

    /// Same as `get_or_refresh`, with the clock injected for deterministic
    /// tests.
    pub async fn get_or_refresh_at(&self, now: Instant) -> Arc<Vec<BookRecord>> {
        {
            let slot = self.slot.read().await;
            if let Some(slot) = slot.as_ref()
                && now.saturating_duration_since(slot.fetched_at) < self.ttl
            {
                return Arc::clone(&slot.books);
            }
        }

        let books = match self.source.fetch_all().await {
            Ok(books) => {
                info!(count = books.len(), "catalog refreshed");
                books
            }
            Err(err) => {
                warn!(%err, "catalog refresh failed, caching empty result");
                Vec::new()
            }
        };

        let books = Arc::new(books);
        let mut slot = self.slot.write().await;
        *slot = Some(Slot {
            books: Arc::clone(&books),
            fetched_at: now,
            refreshed_at: Utc::now(),
        });
        books
    }

    /// Wall-clock time of the last completed refresh, if any.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.slot.read().await.as_ref().map(|slot| slot.refreshed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::DEFAULT_WORD_ESTIMATE;

    fn sample_books() -> Vec<BookRecord> {
        vec![BookRecord {
            id: "1342".to_string(),
            title: "Pride and Prejudice".to_string(),
            author: "Jane Austen".to_string(),
            download_count: "54,321".to_string(),
            url: "https://www.gutenberg.org/ebooks/1342".to_string(),
            estimated_words: DEFAULT_WORD_ESTIMATE,
        }]
    }

    #[tokio::test]
    async fn serves_cached_snapshot_within_ttl() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_all()
            .times(1)
            .returning(|| Ok(sample_books()));

        let cache = CatalogCache::new(Box::new(source));
        let t0 = Instant::now();

        let first = cache.get_or_refresh_at(t0).await;
        assert_eq!(first.len(), 1);

        // One second before expiry: the identical snapshot, no refetch
        // (times(1) above would fail otherwise).
        let second = cache
            .get_or_refresh_at(t0 + Duration::from_secs(299))
            .await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn refetches_after_ttl_expiry() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_all()
            .times(2)
            .returning(|| Ok(sample_books()));

        let cache = CatalogCache::new(Box::new(source));
        let t0 = Instant::now();

        let first = cache.get_or_refresh_at(t0).await;
        let second = cache
            .get_or_refresh_at(t0 + Duration::from_secs(301))
            .await;

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn failed_fetch_caches_empty_result_for_full_ttl() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_all()
            .times(1)
            .returning(|| Err(FetchError::Timeout));

        let cache = CatalogCache::new(Box::new(source));
        let t0 = Instant::now();

        let first = cache.get_or_refresh_at(t0).await;
        assert!(first.is_empty());

        // The empty result is "the current truth" until expiry.
        let second = cache
            .get_or_refresh_at(t0 + Duration::from_secs(100))
            .await;
        assert!(second.is_empty());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn records_last_refresh_time() {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_all().returning(|| Ok(Vec::new()));

        let cache = CatalogCache::new(Box::new(source));
        assert!(cache.last_refreshed().await.is_none());

        cache.get_or_refresh().await;
        assert!(cache.last_refreshed().await.is_some());
    }

    #[tokio::test]
    async fn snapshot_is_replaced_wholesale_not_mutated() {
        let mut source = MockCatalogSource::new();
        let mut call = 0;
        source.expect_fetch_all().returning(move || {
            call += 1;
            if call == 1 {
                Ok(sample_books())
            } else {
                Ok(Vec::new())
            }
        });

        let cache = CatalogCache::new(Box::new(source));
        let t0 = Instant::now();

        let old = cache.get_or_refresh_at(t0).await;
        let new = cache
            .get_or_refresh_at(t0 + Duration::from_secs(400))
            .await;

        // An in-flight holder of the old Arc still sees the old data.
        assert_eq!(old.len(), 1);
        assert!(new.is_empty());
    }
}
