//! Cache layer that orchestrates caching logic with network fetching.

use std::future::Future;
use std::sync::Arc;

use super::storage::{CacheError, CacheStorage};
use super::traits::{CacheResult, Cacheable, QueryKey};

/// Cache layer that manages caching logic and network fetching.
///
/// This layer sits between the application and the network client,
/// serving exact key matches from storage and recording successful fetches.
/// Failed fetches are never stored.
pub struct CacheLayer<S: CacheStorage> {
  storage: Arc<S>,
}

impl<S: CacheStorage> CacheLayer<S> {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: S) -> Self {
    Self {
      storage: Arc::new(storage),
    }
  }

  /// Look up a cached value without fetching.
  pub fn peek<T, K>(&self, key: &K) -> Result<Option<CacheResult<T>>, CacheError>
  where
    T: Cacheable,
    K: QueryKey,
  {
    let cached = self.storage.get::<T>(&key.cache_key())?;
    Ok(cached.map(|entry| CacheResult::from_cache(entry.value, entry.cached_at)))
  }

  /// Fetch with a cache-first strategy.
  ///
  /// 1. Check cache - if present, return immediately
  /// 2. Otherwise run the fetcher
  /// 3. Store the value only if the fetch succeeded
  pub async fn fetch<T, K, E, F, Fut>(&self, key: &K, fetcher: F) -> Result<CacheResult<T>, E>
  where
    T: Cacheable,
    K: QueryKey,
    E: From<CacheError>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    let cache_key = key.cache_key();

    if let Some(entry) = self.storage.get::<T>(&cache_key)? {
      tracing::debug!(
        entity = T::entity_type(),
        key = %key.description(),
        "cache hit"
      );
      return Ok(CacheResult::from_cache(entry.value, entry.cached_at));
    }

    tracing::debug!(
      entity = T::entity_type(),
      key = %key.description(),
      "cache miss"
    );
    let data = fetcher().await?;
    self.storage.store(&cache_key, &data)?;
    Ok(CacheResult::from_network(data))
  }

  /// Number of cached entries.
  pub fn len(&self) -> Result<usize, CacheError> {
    self.storage.len()
  }
}

impl<S: CacheStorage> Clone for CacheLayer<S> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::traits::CacheSource;
  use crate::cache::MemoryStorage;
  use serde::{Deserialize, Serialize};
  use std::sync::atomic::{AtomicU32, Ordering};

  #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
  struct Reading(u32);

  impl Cacheable for Reading {
    fn entity_type() -> &'static str {
      "reading"
    }
  }

  struct Key(&'static str);

  impl QueryKey for Key {
    fn cache_key(&self) -> String {
      self.0.to_string()
    }

    fn description(&self) -> String {
      format!("reading {}", self.0)
    }
  }

  #[derive(Debug)]
  struct TestError;

  impl From<CacheError> for TestError {
    fn from(_: CacheError) -> Self {
      TestError
    }
  }

  #[tokio::test]
  async fn test_second_fetch_is_served_from_cache() {
    let layer = CacheLayer::new(MemoryStorage::new());
    let calls = AtomicU32::new(0);

    let first = layer
      .fetch(&Key("a"), || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, TestError>(Reading(1))
      })
      .await
      .unwrap();
    assert_eq!(first.source, CacheSource::Network);

    let second = layer
      .fetch(&Key("a"), || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, TestError>(Reading(2))
      })
      .await
      .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(second.is_cached());
    assert_eq!(second.data, Reading(1));
    assert!(second.cached_at.is_some());
  }

  #[tokio::test]
  async fn test_failed_fetch_is_not_cached() {
    let layer = CacheLayer::new(MemoryStorage::new());

    let result = layer
      .fetch(&Key("b"), || async { Err::<Reading, _>(TestError) })
      .await;
    assert!(result.is_err());
    assert!(layer.peek::<Reading, _>(&Key("b")).unwrap().is_none());
    assert_eq!(layer.len().unwrap(), 0);
  }

  #[tokio::test]
  async fn test_peek_after_fetch() {
    let layer = CacheLayer::new(MemoryStorage::new());
    layer
      .fetch(&Key("c"), || async { Ok::<_, TestError>(Reading(3)) })
      .await
      .unwrap();

    let peeked = layer.peek::<Reading, _>(&Key("c")).unwrap().unwrap();
    assert_eq!(peeked.data, Reading(3));
    assert_eq!(layer.len().unwrap(), 1);
  }

  #[test]
  fn test_clones_share_storage() {
    let layer = CacheLayer::new(MemoryStorage::new());
    let other = layer.clone();
    layer.storage.store("x", &Reading(9)).unwrap();
    assert_eq!(other.len().unwrap(), 1);
  }
}
