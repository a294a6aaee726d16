// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expiring key/value cache for resolved settings.

use crate::ports::ConfigurationCache;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Expiration applied when `set` is called without an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    // None when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Hit and miss counters for a [`ConfigCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed because they had expired
    pub evictions: u64,
}

/// A thread-safe cache whose entries expire after a time-to-live.
///
/// Expired entries are evicted lazily by the lookup that finds them. There is
/// no size bound. A TTL too large to add to the current instant never
/// expires.
///
/// # Examples
///
/// ```rust
/// use domaincfg::cache::ConfigCache;
/// use domaincfg::ports::ConfigurationCache;
/// use std::time::Duration;
///
/// let cache: ConfigCache<String> = ConfigCache::with_ttl(Duration::from_secs(60));
/// cache.set("EmailSettings:domain:acme", "smtp.acme.test".to_string(), None);
/// assert_eq!(
///     cache.try_get("EmailSettings:domain:acme").as_deref(),
///     Some("smtp.acme.test")
/// );
/// ```
#[derive(Debug)]
pub struct ConfigCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    default_ttl: Duration,
    stats: RwLock<CacheStats>,
}

impl<T: Clone> ConfigCache<T> {
    /// Creates a cache with the five minute default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache whose entries expire after `default_ttl` unless a TTL
    /// is given per entry.
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// The TTL used when none is given to `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Number of stored entries, including any expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        *self.stats.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have replaced the entry in between
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                self.record(|stats| stats.evictions += 1);
                tracing::debug!(key, "Evicted expired cache entry");
                None
            }
            None => None,
        }
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        update(&mut self.stats.write().unwrap_or_else(PoisonError::into_inner));
    }
}

impl<T: Clone> Default for ConfigCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> ConfigurationCache<T> for ConfigCache<T> {
    fn try_get(&self, key: &str) -> Option<T> {
        let found = self.lookup(key);
        if found.is_some() {
            self.record(|stats| stats.hits += 1);
        } else {
            self.record(|stats| stats.misses += 1);
        }
        found
    }

    fn set(&self, key: &str, value: T, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
