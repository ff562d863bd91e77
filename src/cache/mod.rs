//! Generic session cache for fetched data.
//!
//! This module provides a transport-agnostic caching mechanism that:
//! - Stores any serializable value under a caller-supplied query key
//! - Serves exact key matches without touching the network
//! - Keeps entries for the lifetime of the process (no eviction, no TTL)

mod layer;
mod storage;
mod traits;

pub use layer::CacheLayer;
pub use storage::{CacheError, MemoryStorage};
pub use traits::{CacheResult, Cacheable, QueryKey};
