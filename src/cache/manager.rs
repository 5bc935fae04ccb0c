//! Cache manager for weather reports
//!
//! Provides a `CacheManager` that stores one timestamped JSON record per city
//! and treats records older than the expiration window as misses.

use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::storage::{FileStorage, Storage};
use crate::data::WeatherReport;

/// How long a cached report stays fresh (10 minutes)
pub const CACHE_EXPIRATION: Duration = Duration::from_millis(10 * 60 * 1000);

/// Record stored under each key
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// When the data was cached, in epoch milliseconds
    timestamp: i64,
    /// The cached data
    data: T,
}

/// Reads and writes weather reports keyed by city name
///
/// Keys are `weather_<lowercased city>`. Entries are never deleted; an expired
/// entry is ignored on read and replaced by the next successful write.
#[derive(Clone)]
pub struct CacheManager {
    storage: Arc<dyn Storage>,
    ttl_ms: i64,
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("ttl_ms", &self.ttl_ms)
            .finish_non_exhaustive()
    }
}

impl CacheManager {
    /// Creates a CacheManager using the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/clima/` on Linux, or equivalent XDG path on other platforms.
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        Some(Self::with_dir(default_cache_dir()?))
    }

    /// Creates a CacheManager storing files in a custom directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self::with_storage(Arc::new(FileStorage::new(cache_dir)))
    }

    /// Creates a CacheManager over any storage backend
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            ttl_ms: CACHE_EXPIRATION.as_millis() as i64,
        }
    }

    /// Overrides the expiration window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = ttl.as_millis() as i64;
        self
    }

    /// Storage key for a city; lookups are case-insensitive
    pub fn cache_key(city: &str) -> String {
        format!("weather_{}", city.to_lowercase())
    }

    /// Returns the cached report for `city` if it is still fresh
    pub fn get(&self, city: &str) -> Option<WeatherReport> {
        self.get_at(city, now_ms())
    }

    /// Like [`get`](Self::get), with an explicit clock in epoch milliseconds
    ///
    /// A record is fresh while `0 <= now_ms - timestamp < ttl`; a record exactly
    /// `ttl` old is already expired, and one stamped after `now_ms` (clock
    /// moved back) is a miss. Unparseable records count as misses.
    pub fn get_at(&self, city: &str, now_ms: i64) -> Option<WeatherReport> {
        let key = Self::cache_key(city);
        let raw = self.storage.get_item(&key)?;

        let entry: CacheEntry<WeatherReport> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring malformed cache entry");
                return None;
            }
        };

        let age_ms = now_ms - entry.timestamp;
        if age_ms < 0 {
            tracing::debug!(key = %key, age_ms, "cache entry stamped in the future");
            return None;
        }
        if age_ms >= self.ttl_ms {
            tracing::debug!(key = %key, age_ms, "cache entry expired");
            return None;
        }

        tracing::debug!(key = %key, age_ms, "cache hit");
        Some(entry.data)
    }

    /// Stores `report` for `city`, replacing any previous entry
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if serialization or the storage write fails
    pub fn put(&self, city: &str, report: &WeatherReport) -> std::io::Result<()> {
        self.put_at(city, report, now_ms())
    }

    /// Like [`put`](Self::put), with an explicit clock in epoch milliseconds
    pub fn put_at(&self, city: &str, report: &WeatherReport, now_ms: i64) -> std::io::Result<()> {
        let entry = CacheEntry {
            timestamp: now_ms,
            data: report,
        };

        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        self.storage.set_item(&Self::cache_key(city), &json)
    }
}

/// `~/.cache/clima` on Linux, or the platform equivalent
pub fn default_cache_dir() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "clima")?;
    Some(project_dirs.cache_dir().to_path_buf())
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
