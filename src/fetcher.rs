//! Match history source consumed by the dashboard, and its per-session cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::riot::{FetchError, MAX_MATCH_IDS, MatchDto, Region, RiotClient};

#[async_trait]
pub trait MatchFetcher: Send + Sync {
    /// Ids of the tracked player's matches within `[start, end]`, at most 100.
    async fn fetch_match_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<String>, FetchError>;

    async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, FetchError>;
}

/// [`MatchFetcher`] backed by the Riot Match-v5 API for one player.
pub struct RiotMatchFetcher {
    client: RiotClient,
    region: Region,
    puuid: String,
}

impl RiotMatchFetcher {
    pub fn new(client: RiotClient, region: Region, puuid: String) -> Self {
        Self {
            client,
            region,
            puuid,
        }
    }
}

#[async_trait]
impl MatchFetcher for RiotMatchFetcher {
    async fn fetch_match_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<String>, FetchError> {
        self.client
            .get_match_ids_between(
                self.region,
                &self.puuid,
                start.timestamp(),
                end.timestamp(),
                MAX_MATCH_IDS,
            )
            .await
    }

    async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, FetchError> {
        self.client.get_match(self.region, match_id).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes another fetcher by exact call arguments until [`clear`](Self::clear).
///
/// Failed calls are not cached.
pub struct CachedFetcher<F> {
    inner: F,
    ids: Mutex<HashMap<(DateTime<Utc>, DateTime<Utc>), Vec<String>>>,
    details: Mutex<HashMap<String, MatchDto>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<F: MatchFetcher> CachedFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            ids: Mutex::new(HashMap::new()),
            details: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drops every memoized response and resets the counters.
    pub fn clear(&self) {
        lock(&self.ids).clear();
        lock(&self.details).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("🗃️ Session cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl<F: MatchFetcher> MatchFetcher for CachedFetcher<F> {
    async fn fetch_match_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<String>, FetchError> {
        let cached = lock(&self.ids).get(&(start, end)).cloned();
        if let Some(ids) = cached {
            self.hit();
            return Ok(ids);
        }

        self.miss();
        let ids = self.inner.fetch_match_ids(start, end).await?;
        lock(&self.ids).insert((start, end), ids.clone());

        Ok(ids)
    }

    async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, FetchError> {
        let cached = lock(&self.details).get(match_id).cloned();
        if let Some(detail) = cached {
            self.hit();
            return Ok(detail);
        }

        self.miss();
        let detail = self.inner.fetch_match_detail(match_id).await?;
        lock(&self.details).insert(match_id.to_string(), detail.clone());

        Ok(detail)
    }
}

// Entries are inserted whole, a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use chrono::TimeZone;

    use super::*;
    use crate::riot::InfoDto;

    #[derive(Default)]
    struct CountingFetcher {
        id_calls: AtomicUsize,
        detail_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl MatchFetcher for CountingFetcher {
        async fn fetch_match_ids(
            &self,
            start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<String>, FetchError> {
            self.id_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            Ok(vec![format!("EUW1_{}", start.timestamp())])
        }

        async fn fetch_match_detail(&self, _match_id: &str) -> Result<MatchDto, FetchError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            Ok(MatchDto {
                info: InfoDto {
                    game_start_timestamp: 0,
                    game_end_timestamp: None,
                    game_duration: 0,
                    participants: vec![],
                    queue_id: 420,
                },
            })
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn identical_calls_hit_upstream_once() {
        let cache = CachedFetcher::new(CountingFetcher::default());

        let first = cache.fetch_match_ids(at(0), at(1)).await.unwrap();
        let second = cache.fetch_match_ids(at(0), at(1)).await.unwrap();
        cache.fetch_match_detail("EUW1_1").await.unwrap();
        cache.fetch_match_detail("EUW1_1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner().id_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.inner().detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
    }

    #[tokio::test]
    async fn distinct_arguments_are_cached_separately() {
        let cache = CachedFetcher::new(CountingFetcher::default());

        cache.fetch_match_ids(at(0), at(1)).await.unwrap();
        cache.fetch_match_ids(at(0), at(2)).await.unwrap();
        cache.fetch_match_detail("EUW1_1").await.unwrap();
        cache.fetch_match_detail("EUW1_2").await.unwrap();

        assert_eq!(cache.inner().id_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.inner().detail_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_forces_a_refetch() {
        let cache = CachedFetcher::new(CountingFetcher::default());

        cache.fetch_match_ids(at(0), at(1)).await.unwrap();
        cache.clear();
        cache.fetch_match_ids(at(0), at(1)).await.unwrap();

        assert_eq!(cache.inner().id_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 1 });
    }

    #[tokio::test]
    async fn failures_are_not_memoized() {
        let cache = CachedFetcher::new(CountingFetcher {
            fail: true,
            ..Default::default()
        });

        assert!(cache.fetch_match_ids(at(0), at(1)).await.is_err());
        assert!(cache.fetch_match_ids(at(0), at(1)).await.is_err());

        assert_eq!(cache.inner().id_calls.load(Ordering::SeqCst), 2);
    }
}
