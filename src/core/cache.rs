//! Unified caching system for both in-memory LRU cache and persistent file storage
//!
//! This module provides a two-tier caching system:
//! - L1 Cache: In-memory LRU cache for fast access
//! - L2 Cache: JSON files under a cache root for reuse across runs
//!
//! Caches are constructed by the caller and handed to whatever needs them;
//! there is no process-wide instance.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt, fs,
    hash::Hash,
    io::Write,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, warn};

use crate::{LeagueId, Week};

#[cfg(test)]
mod tests;

/// Directory name used under the platform cache dir.
pub const APP_DIR: &str = "sleeper-bestball";

/// `~/.cache/sleeper-bestball` (or the platform equivalent).
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(APP_DIR)
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// File stem for disk storage; must be unique per key.
    fn to_file_key(&self) -> String;
}

/// Cache key for `/league/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueCacheKey {
    pub league_id: LeagueId,
}

impl CacheKey for LeagueCacheKey {
    fn to_file_key(&self) -> String {
        format!("league_l{}", self.league_id)
    }
}

/// Per-league collections that change rarely during a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueResource {
    Users,
    Rosters,
}

impl fmt::Display for LeagueResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueResource::Users => write!(f, "users"),
            LeagueResource::Rosters => write!(f, "rosters"),
        }
    }
}

/// Cache key for `/league/{id}/users` and `/league/{id}/rosters`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueResourceCacheKey {
    pub league_id: LeagueId,
    pub resource: LeagueResource,
}

impl CacheKey for LeagueResourceCacheKey {
    fn to_file_key(&self) -> String {
        format!("{}_l{}", self.resource, self.league_id)
    }
}

/// Cache key for `/league/{id}/matchups/{week}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchupsCacheKey {
    pub league_id: LeagueId,
    pub week: Week,
}

impl CacheKey for MatchupsCacheKey {
    fn to_file_key(&self) -> String {
        format!("matchups_l{}_w{}", self.league_id, self.week.as_u16())
    }
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Mutex<LruCache<K, V>>,
    memory_capacity: usize,
    /// `None` keeps the cache memory-only.
    disk_root: Option<PathBuf>,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a new unified cache with specified memory capacity
    pub fn new(memory_capacity: usize, disk_root: Option<PathBuf>) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(capacity)),
            memory_capacity: capacity.get(),
            disk_root,
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, V>> {
        // Entries are replaced whole, so a poisoned lock is still usable.
        self.memory_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory().get(key) {
            debug!(key = %key.to_file_key(), "memory cache hit");
            return Some(value.clone());
        }

        let value = self.get_from_disk(key)?;
        debug!(key = %key.to_file_key(), "disk cache hit");
        self.memory().put(key.clone(), value.clone());
        Some(value)
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) {
        if let Err(e) = self.put_to_disk(&key, &value) {
            warn!(key = %key.to_file_key(), error = %e, "failed to persist cache entry");
        }
        self.memory().put(key, value);
    }

    /// Drop an entry from both tiers.
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        if let Some(path) = self.file_path(key) {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Where `key` lives on disk, if this cache persists at all.
    pub fn file_path(&self, key: &K) -> Option<PathBuf> {
        self.disk_root
            .as_ref()
            .map(|root| root.join(format!("{}.json", key.to_file_key())))
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let content = try_read_to_string(&self.file_path(key)?)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let Some(path) = self.file_path(key) else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// (entries in memory, memory capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}

/// Raw Sleeper responses, keyed by request.
pub struct ApiCache {
    pub leagues: UnifiedCache<LeagueCacheKey, Value>,
    pub league_resources: UnifiedCache<LeagueResourceCacheKey, Value>,
    pub matchups: UnifiedCache<MatchupsCacheKey, Value>,
}

impl ApiCache {
    /// Cache persisted under `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::build(Some(root.into()))
    }

    /// Cache persisted under [`default_cache_dir`].
    pub fn on_disk() -> Self {
        Self::at(default_cache_dir())
    }

    pub fn in_memory() -> Self {
        Self::build(None)
    }

    fn build(root: Option<PathBuf>) -> Self {
        Self {
            leagues: UnifiedCache::new(8, root.clone()),
            league_resources: UnifiedCache::new(16, root.clone()),
            // A full season of weeks for a couple of leagues.
            matchups: UnifiedCache::new(64, root),
        }
    }

    pub fn clear_memory(&self) {
        self.leagues.clear_memory();
        self.league_resources.clear_memory();
        self.matchups.clear_memory();
    }
}
