//! In-memory cache for fetched pages.
//!
//! Bounded by entry count and age. When full, the least recently used entry
//! is evicted. Only successful fetches are stored, so a transient failure is
//! retried on the next request.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use super::{ContentFetcher, FetchError, FetchedPage};

struct CacheEntry {
    page: FetchedPage,
    expires_at: Instant,
    last_used: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    clock: u64,
}

impl CacheInner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

pub struct ContentCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
    ttl: Duration,
}

impl ContentCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Returns the cached page for `url`, dropping it if it has expired.
    pub fn get(&self, url: &str) -> Option<FetchedPage> {
        let mut inner = self.inner.lock().ok()?;
        let now = Instant::now();

        if inner.entries.get(url)?.is_expired(now) {
            inner.entries.remove(url);
            return None;
        }

        let tick = inner.tick();
        let entry = inner.entries.get_mut(url)?;
        entry.last_used = tick;
        Some(entry.page.clone())
    }

    pub fn insert(&self, url: String, page: FetchedPage) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let now = Instant::now();

        if !inner.entries.contains_key(&url) && inner.entries.len() >= self.capacity {
            inner.entries.retain(|_, entry| !entry.is_expired(now));
            if inner.entries.len() >= self.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_used)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    inner.entries.remove(&oldest);
                }
            }
        }

        let last_used = inner.tick();
        inner.entries.insert(
            url,
            CacheEntry {
                page,
                expires_at: now + self.ttl,
                last_used,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }
}

/// Wraps a fetcher with a [`ContentCache`].
pub struct CachedFetcher<F> {
    inner: F,
    cache: ContentCache,
}

impl<F: ContentFetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: ContentCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<F: ContentFetcher> ContentFetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let key = url.trim();
        if let Some(page) = self.cache.get(key) {
            debug!("Content cache hit for {key}");
            return Ok(page);
        }

        let page = self.inner.fetch(key).await?;
        self.cache.insert(key.to_string(), page.clone());
        debug!("Cached {key} ({} entries)", self.cache.len());
        Ok(page)
    }
}
