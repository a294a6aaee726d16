// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings cache trait definition.

use std::time::Duration;

/// A keyed cache of resolved settings with per-entry expiry.
///
/// Implementations must tolerate concurrent readers and writers without
/// external locking. No atomicity across keys is expected.
pub trait ConfigurationCache<T>: Send + Sync {
    /// Returns the cached value if present and not yet expired.
    ///
    /// An expired entry is removed as part of the lookup and reported as a
    /// miss.
    fn try_get(&self, key: &str) -> Option<T>;

    /// Stores a value, expiring after `ttl` or the cache default.
    fn set(&self, key: &str, value: T, ttl: Option<Duration>);

    /// Removes one entry.
    fn remove(&self, key: &str);

    /// Removes every entry.
    fn clear(&self);
}
