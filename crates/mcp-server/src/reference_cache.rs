//! TTL cache for the rarely changing reference catalogues (regions, machine types, kernels).
//!
//! One instance exists per account. All three catalogues share a single expiry: refreshing any
//! of them restamps it, and `invalidate_all` resets it.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use cloudmcp_linode::models::{Kernel, LinodeType, Region};
use cloudmcp_linode::{ApiError, LinodeClient};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Where the cache gets its data from.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn regions(&self) -> Result<Vec<Region>, ApiError>;
    async fn types(&self) -> Result<Vec<LinodeType>, ApiError>;
    async fn kernels(&self) -> Result<Vec<Kernel>, ApiError>;
}

#[async_trait]
impl ReferenceSource for LinodeClient {
    async fn regions(&self) -> Result<Vec<Region>, ApiError> {
        LinodeClient::regions(self).await
    }

    async fn types(&self) -> Result<Vec<LinodeType>, ApiError> {
        self.linode_types().await
    }

    async fn kernels(&self) -> Result<Vec<Kernel>, ApiError> {
        LinodeClient::kernels(self).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalogue {
    Regions,
    Types,
    Kernels,
}

impl fmt::Display for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regions => "regions",
            Self::Types => "types",
            Self::Kernels => "kernels",
        })
    }
}

#[derive(Default)]
struct CacheState {
    regions: Vec<Region>,
    types: Vec<LinodeType>,
    kernels: Vec<Kernel>,
    /// `None` is the zero instant: nothing is fresh.
    expiry: Option<Instant>,
}

impl CacheState {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expiry.is_some_and(|expiry| now < expiry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogueStats {
    pub populated: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub regions: CatalogueStats,
    pub types: CatalogueStats,
    pub kernels: CatalogueStats,
    pub expiry: Option<Instant>,
    /// Time left before expiry; `None` once expired or never populated.
    pub expires_in: Option<Duration>,
    pub is_expired: bool,
    pub ttl: Duration,
}

pub struct ReferenceCache {
    state: RwLock<CacheState>,
    ttl: Duration,
}

impl fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl ReferenceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn regions(&self, source: &dyn ReferenceSource) -> Result<Vec<Region>, ApiError> {
        self.get_or_refresh(
            Catalogue::Regions,
            |s| &s.regions,
            |s| &mut s.regions,
            || source.regions(),
        )
        .await
    }

    pub async fn types(&self, source: &dyn ReferenceSource) -> Result<Vec<LinodeType>, ApiError> {
        self.get_or_refresh(
            Catalogue::Types,
            |s| &s.types,
            |s| &mut s.types,
            || source.types(),
        )
        .await
    }

    pub async fn kernels(&self, source: &dyn ReferenceSource) -> Result<Vec<Kernel>, ApiError> {
        self.get_or_refresh(
            Catalogue::Kernels,
            |s| &s.kernels,
            |s| &mut s.kernels,
            || source.kernels(),
        )
        .await
    }

    /// Copy out a fresh, non-empty slot; otherwise refresh it under the write lock.
    async fn get_or_refresh<T, F, Fut>(
        &self,
        catalogue: Catalogue,
        slot: fn(&CacheState) -> &Vec<T>,
        slot_mut: fn(&mut CacheState) -> &mut Vec<T>,
        fetch: F,
    ) -> Result<Vec<T>, ApiError>
    where
        T: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        {
            let state = self.state.read().await;
            if state.is_fresh(Instant::now()) && !slot(&state).is_empty() {
                return Ok(slot(&state).clone());
            }
        }

        let mut state = self.state.write().await;
        if state.is_fresh(Instant::now()) && !slot(&state).is_empty() {
            return Ok(slot(&state).clone());
        }

        log::debug!("Refreshing {catalogue} catalogue");
        let fresh = fetch().await?;
        *slot_mut(&mut state) = fresh.clone();
        state.expiry = Some(Instant::now() + self.ttl);
        Ok(fresh)
    }

    /// Empty one catalogue. The shared expiry is left alone.
    pub async fn invalidate(&self, catalogue: Catalogue) {
        let mut state = self.state.write().await;
        match catalogue {
            Catalogue::Regions => state.regions.clear(),
            Catalogue::Types => state.types.clear(),
            Catalogue::Kernels => state.kernels.clear(),
        }
    }

    pub async fn invalidate_all(&self) {
        let mut state = self.state.write().await;
        state.regions.clear();
        state.types.clear();
        state.kernels.clear();
        state.expiry = None;
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let now = Instant::now();
        let catalogue = |len: usize| CatalogueStats {
            populated: len > 0,
            count: len,
        };
        CacheStats {
            regions: catalogue(state.regions.len()),
            types: catalogue(state.types.len()),
            kernels: catalogue(state.kernels.len()),
            expiry: state.expiry,
            expires_in: state
                .expiry
                .and_then(|expiry| expiry.checked_duration_since(now))
                .filter(|left| !left.is_zero()),
            is_expired: !state.is_fresh(now),
            ttl: self.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingSource {
        regions: AtomicUsize,
        types: AtomicUsize,
        kernels: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    fn region(id: &str) -> Region {
        Region {
            id: id.to_string(),
            label: id.to_uppercase(),
            ..Default::default()
        }
    }

    #[async_trait]
    impl ReferenceSource for CountingSource {
        async fn regions(&self) -> Result<Vec<Region>, ApiError> {
            self.regions.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Status {
                    status: 503,
                    message: "maintenance".into(),
                });
            }
            Ok(vec![region("us-east"), region("eu-west")])
        }

        async fn types(&self) -> Result<Vec<LinodeType>, ApiError> {
            self.types.fetch_add(1, Ordering::SeqCst);
            Ok(vec![LinodeType {
                id: "g6-nanode-1".into(),
                ..Default::default()
            }])
        }

        async fn kernels(&self) -> Result<Vec<Kernel>, ApiError> {
            self.kernels.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn serves_from_cache_until_ttl_elapses() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();

        cache.regions(&source).await.unwrap();
        cache.regions(&source).await.unwrap();
        assert_eq!(source.regions.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(59)).await;
        cache.regions(&source).await.unwrap();
        assert_eq!(source.regions.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.regions(&source).await.unwrap();
        assert_eq!(source.regions.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_is_shared_across_catalogues() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();

        cache.regions(&source).await.unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;
        // Refreshing types restamps the shared expiry, which keeps regions fresh too.
        cache.types(&source).await.unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;
        cache.regions(&source).await.unwrap();
        assert_eq!(source.regions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_catalogue_is_always_refetched() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();
        cache.kernels(&source).await.unwrap();
        cache.kernels(&source).await.unwrap();
        assert_eq!(source.kernels.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn returned_slice_is_a_copy() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();

        let mut first = cache.regions(&source).await.unwrap();
        first[0].label = "mutated".into();
        first.clear();

        let second = cache.regions(&source).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].label, "US-EAST");
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_untouched() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();
        source.fail.store(true, Ordering::SeqCst);

        let err = cache.regions(&source).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        let stats = cache.stats().await;
        assert!(!stats.regions.populated);
        assert!(stats.is_expired);
        assert_eq!(stats.expiry, None);
    }

    #[tokio::test]
    async fn invalidate_keeps_expiry_and_invalidate_all_resets_it() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let source = CountingSource::default();
        cache.regions(&source).await.unwrap();
        cache.types(&source).await.unwrap();

        cache.invalidate(Catalogue::Regions).await;
        let stats = cache.stats().await;
        assert!(!stats.regions.populated);
        assert!(stats.types.populated);
        assert!(stats.expiry.is_some());
        assert!(!stats.is_expired);

        cache.regions(&source).await.unwrap();
        assert_eq!(source.regions.load(Ordering::SeqCst), 2);

        cache.invalidate_all().await;
        let stats = cache.stats().await;
        assert_eq!(stats.expiry, None);
        assert!(stats.is_expired);
        assert_eq!(stats.types.count, 0);
    }

    #[tokio::test]
    async fn concurrent_misses_fetch_once() {
        let cache = Arc::new(ReferenceCache::new(Duration::from_secs(60)));
        let source = Arc::new(CountingSource::default());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                let source = source.clone();
                tokio::spawn(async move { cache.regions(source.as_ref()).await.map(|r| r.len()) })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 2);
        }
        assert_eq!(source.regions.load(Ordering::SeqCst), 1);
    }
}
