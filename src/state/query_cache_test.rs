use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::time::sleep;

const STALE: Duration = Duration::from_secs(30);

fn key(resource: &'static str, search: &str) -> QueryKey {
    let mut key = QueryKey::new(resource);
    search.clone_into(&mut key.search);
    key
}

fn counting_fetch(calls: &Arc<AtomicUsize>, value: u32) -> impl Future<Output = Result<u32, ApiError>> + Send + 'static {
    let calls = calls.clone();
    async move {
        calls.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(50)).await;
        Ok(value)
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_fetch() {
    let cache = QueryCache::new(STALE);
    let calls = Arc::new(AtomicUsize::new(0));
    let k = key("/api/contacts/", "jane");

    let (a, b, c) = tokio::join!(
        cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 1)),
        cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 2)),
        cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 3)),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!((*a.unwrap(), *b.unwrap(), *c.unwrap()), (1, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn fresh_entry_skips_fetch_until_stale() {
    let cache = QueryCache::new(STALE);
    let calls = Arc::new(AtomicUsize::new(0));
    let k = key("/api/contacts/", "");

    cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 1)).await.unwrap();
    let again = cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 2)).await.unwrap();
    assert_eq!(*again, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    sleep(STALE).await;
    let refreshed = cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 2)).await.unwrap();
    assert_eq!(*refreshed, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn errors_are_not_cached() {
    let cache: QueryCache<u32> = QueryCache::new(STALE);
    let k = key("/api/email/history/", "");

    let err = cache
        .get_or_fetch(k.clone(), || async { Err(ApiError::SessionExpired) })
        .await
        .unwrap_err();
    assert!(matches!(*err, ApiError::SessionExpired));
    assert!(cache.is_empty());

    let ok = cache.get_or_fetch(k.clone(), || async { Ok(5) }).await.unwrap();
    assert_eq!(*ok, 5);
}

#[tokio::test(start_paused = true)]
async fn invalidate_drops_only_that_resource() {
    let cache = QueryCache::new(STALE);
    let contacts = key("/api/contacts/", "a");
    let history = key("/api/email/history/", "a");
    cache.get_or_fetch(contacts.clone(), || async { Ok(1) }).await.unwrap();
    cache.get_or_fetch(history.clone(), || async { Ok(2) }).await.unwrap();

    cache.invalidate("/api/contacts/");
    assert_eq!(cache.peek(&contacts), None);
    assert_eq!(cache.peek(&history).as_deref(), Some(&2));
}

#[tokio::test(start_paused = true)]
async fn invalidation_mid_flight_discards_result() {
    let cache = Arc::new(QueryCache::new(STALE));
    let calls = Arc::new(AtomicUsize::new(0));
    let k = key("/api/contacts/", "");

    let pending = {
        let cache = cache.clone();
        let calls = calls.clone();
        let k = k.clone();
        tokio::spawn(async move { cache.get_or_fetch(k, || counting_fetch(&calls, 1)).await })
    };
    sleep(Duration::from_millis(10)).await;
    cache.invalidate("/api/contacts/");

    assert_eq!(*pending.await.unwrap().unwrap(), 1);
    assert_eq!(cache.peek(&k), None);
}

#[tokio::test(start_paused = true)]
async fn configured_stale_time_expires_entries() {
    let config = ClientConfig { cache_stale: Duration::from_secs(5), ..ClientConfig::default() };
    let cache = QueryCache::from_config(&config);
    assert_eq!(cache.stale_after(), Duration::from_secs(5));

    let calls = Arc::new(AtomicUsize::new(0));
    let k = key("/api/contacts/", "");
    cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 1)).await.unwrap();
    sleep(Duration::from_secs(4)).await;
    cache.get_or_fetch(k.clone(), || counting_fetch(&calls, 2)).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    sleep(Duration::from_secs(2)).await;
    let value = cache.get_or_fetch(k, || counting_fetch(&calls, 3)).await.unwrap();
    assert_eq!(*value, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
