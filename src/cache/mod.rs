//! Cache module for storing weather reports between lookups
//!
//! This module provides a cache manager that persists one report per city with
//! a fixed freshness window, over a pluggable key-value storage backend.

mod manager;
mod storage;

pub use manager::{default_cache_dir, CacheManager, CACHE_EXPIRATION};
pub use storage::{FileStorage, MemoryStorage, Storage};
