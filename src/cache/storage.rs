//! Cache storage trait and in-memory implementation.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

use super::traits::Cacheable;

#[derive(Error, Debug)]
pub enum CacheError {
  #[error("Cache lock poisoned")]
  Poisoned,

  #[error("Failed to (de)serialize cached value: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// A single cached value.
#[derive(Debug, Clone)]
pub struct CachedEntry<T> {
  /// The cached value
  pub value: T,
  /// When the value was cached
  pub cached_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
pub trait CacheStorage: Send + Sync {
  /// Get a cached value by key.
  fn get<T: Cacheable>(&self, key: &str) -> Result<Option<CachedEntry<T>>, CacheError>;

  /// Store a value, replacing any previous entry under the same key.
  fn store<T: Cacheable>(&self, key: &str, value: &T) -> Result<(), CacheError>;

  /// Number of stored entries.
  fn len(&self) -> Result<usize, CacheError>;
}

/// Unbounded in-memory storage. Values are kept as JSON so one store can
/// hold any `Cacheable` type.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, CachedEntry<Value>>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CacheStorage for MemoryStorage {
  fn get<T: Cacheable>(&self, key: &str) -> Result<Option<CachedEntry<T>>, CacheError> {
    let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;

    match entries.get(key) {
      Some(entry) => {
        let value: T = serde_json::from_value(entry.value.clone())?;
        Ok(Some(CachedEntry {
          value,
          cached_at: entry.cached_at,
        }))
      }
      None => Ok(None),
    }
  }

  fn store<T: Cacheable>(&self, key: &str, value: &T) -> Result<(), CacheError> {
    let value = serde_json::to_value(value)?;
    let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;

    entries.insert(
      key.to_string(),
      CachedEntry {
        value,
        cached_at: Utc::now(),
      },
    );
    Ok(())
  }

  fn len(&self) -> Result<usize, CacheError> {
    let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
    Ok(entries.len())
  }
}
