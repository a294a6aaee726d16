// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration source.
//!
//! Useful for defaults registered in code and for tests. Clones share the
//! same storage, so a handle kept outside the configuration root can change
//! values after the root has been built; call
//! [`ConfigurationRoot::reload`](crate::service::ConfigurationRoot::reload)
//! afterwards to publish them.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A configuration source backed by a shared map.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::ports::ConfigSource;
///
/// let source = MemoryConfigSource::new().with_value("PasswordPolicy:MinimumLength", "10");
/// let handle = source.clone();
/// handle.set("PasswordPolicy:MinimumLength", "12");
///
/// assert_eq!(
///     source.get_str("PasswordPolicy:MinimumLength").unwrap().unwrap().as_str(),
///     "12"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MemoryConfigSource {
    name: String,
    priority: u8,
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryConfigSource {
    /// Creates an empty source with priority 0.
    pub fn new() -> Self {
        Self {
            name: "memory".to_string(),
            priority: 0,
            values: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Creates a source pre-filled with `values`.
    pub fn from_pairs<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let source = Self::new();
        for (key, value) in values {
            source.set(key, value);
        }
        source
    }

    /// Renames the source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the source priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a value.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl Default for MemoryConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for MemoryConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_defaults() {
        let source = MemoryConfigSource::default();
        assert_eq!(source.name(), "memory");
        assert_eq!(source.priority(), 0);
        assert!(source.all_keys().unwrap().is_empty());
    }

    #[test]
    fn test_memory_source_shared_between_clones() {
        let source = MemoryConfigSource::from_pairs([("A:B", "1")]).with_priority(4);
        let handle = source.clone();
        handle.set("A:C", "2");
        handle.remove("A:B");

        assert_eq!(source.priority(), 4);
        assert!(source.get_str("A:B").unwrap().is_none());
        assert_eq!(source.get_str("A:C").unwrap().unwrap().as_str(), "2");
    }
}
