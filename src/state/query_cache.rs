//! Keyed cache of list query results.
//!
//! DESIGN
//! ======
//! One entry per [`QueryKey`]. A missing or stale entry starts a fetch that
//! is stored as a shared future, so callers asking for the same key while it
//! runs await the same request. A success becomes a ready entry stamped with
//! its fetch time; a failure removes the entry so the next call retries.
//!
//! Every awaiting caller tries to settle the entry, guarded by a generation
//! number, so an invalidation that lands mid-flight is never overwritten by
//! the stale result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::time::Instant;
use tracing::debug;

use super::filters::QueryKey;
use crate::config::ClientConfig;
use crate::error::ApiError;

pub type CachedResult<T> = Result<Arc<T>, Arc<ApiError>>;

type SharedFetch<T> = Shared<BoxFuture<'static, CachedResult<T>>>;

enum Entry<T> {
    InFlight { fetch: SharedFetch<T>, generation: u64 },
    Ready { value: Arc<T>, fetched_at: Instant },
}

struct Inner<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    next_generation: u64,
}

pub struct QueryCache<T> {
    stale_after: Duration,
    inner: Mutex<Inner<T>>,
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    #[must_use]
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            inner: Mutex::new(Inner { entries: HashMap::new(), next_generation: 0 }),
        }
    }

    /// Cache whose entries go stale after the configured period.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.cache_stale)
    }

    #[must_use]
    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    /// Return the cached value for `key`, joining or starting a fetch when
    /// there is no fresh one.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, shared with every caller that joined it.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> CachedResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (shared, generation) = {
            let mut inner = self.lock();
            let existing = match inner.entries.get(&key) {
                Some(Entry::Ready { value, fetched_at }) if fetched_at.elapsed() < self.stale_after => {
                    debug!(resource = key.resource, "query cache hit");
                    return Ok(value.clone());
                }
                Some(Entry::InFlight { fetch, generation }) => Some((fetch.clone(), *generation)),
                _ => None,
            };
            if let Some(joined) = existing {
                debug!(resource = key.resource, "query cache joining in-flight fetch");
                joined
            } else {
                let generation = inner.next_generation;
                inner.next_generation += 1;
                let shared = fetch()
                    .map(|result| result.map(Arc::new).map_err(Arc::new))
                    .boxed()
                    .shared();
                inner
                    .entries
                    .insert(key.clone(), Entry::InFlight { fetch: shared.clone(), generation });
                debug!(resource = key.resource, "query cache miss");
                (shared, generation)
            }
        };

        let result = shared.await;
        self.settle(&key, generation, &result);
        result
    }

    /// The cached value, fresh or stale, without fetching.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Option<Arc<T>> {
        match self.lock().entries.get(key) {
            Some(Entry::Ready { value, .. }) => Some(value.clone()),
            _ => None,
        }
    }

    /// Drop every entry whose key belongs to `resource`.
    pub fn invalidate(&self, resource: &str) {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| key.resource != resource);
        debug!(resource, dropped = before - inner.entries.len(), "query cache invalidated");
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn settle(&self, key: &QueryKey, generation: u64, result: &CachedResult<T>) {
        let mut inner = self.lock();
        let current = matches!(
            inner.entries.get(key),
            Some(Entry::InFlight { generation: g, .. }) if *g == generation
        );
        if !current {
            return;
        }
        match result {
            Ok(value) => {
                inner
                    .entries
                    .insert(key.clone(), Entry::Ready { value: value.clone(), fetched_at: Instant::now() });
            }
            Err(_) => {
                inner.entries.remove(key);
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "query_cache_test.rs"]
mod tests;
