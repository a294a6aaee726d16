// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical configuration reader.
//!
//! This is the read-side contract every provider depends on: value lookup
//! by path, existence checks and child enumeration. Binding a subtree into
//! a settings record is layered on top through [`ConfigSection`].

use crate::domain::{ConfigKey, ConfigSection, ConfigValue};

/// Read access to a merged, hierarchical configuration tree.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::ports::Configuration;
/// use domaincfg::service::ConfigurationRoot;
/// use std::sync::Arc;
///
/// let root = ConfigurationRoot::builder()
///     .with_source(Box::new(
///         MemoryConfigSource::new()
///             .with_value("DomainSmsSettings:acme:Provider", "Twilio")
///             .with_value("DomainSmsSettings:globex:Provider", "Twilio"),
///     ))
///     .build()
///     .unwrap();
/// let config: Arc<dyn Configuration> = Arc::new(root);
///
/// let section = config.section("DomainSmsSettings");
/// assert!(section.exists());
/// assert_eq!(section.child_keys(), vec!["acme", "globex"]);
/// assert!(!config.section("DomainSmsSettings:initech").exists());
/// ```
pub trait Configuration: Send + Sync {
    /// Returns the value stored exactly at `key`, if any.
    fn get_value(&self, key: &ConfigKey) -> Option<ConfigValue>;

    /// Returns the distinct immediate child segments below `key`, ordered
    /// with array indices first by numeric value.
    fn children(&self, key: &ConfigKey) -> Vec<String>;

    /// Returns `true` when `key` holds a value or has any descendant.
    fn exists(&self, key: &ConfigKey) -> bool;
}

impl<'c> dyn Configuration + 'c {
    /// Returns a view of the subtree rooted at `path`.
    ///
    /// The section is returned even if nothing exists at `path`; use
    /// [`ConfigSection::exists`] to tell the two apart.
    pub fn section(&self, path: impl Into<ConfigKey>) -> ConfigSection<'_> {
        ConfigSection::new(self, path.into())
    }

    /// Convenience lookup by string path.
    pub fn value(&self, path: &str) -> Option<ConfigValue> {
        self.get_value(&ConfigKey::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct FlatConfig(BTreeMap<String, String>);

    impl Configuration for FlatConfig {
        fn get_value(&self, key: &ConfigKey) -> Option<ConfigValue> {
            self.0.get(key.as_str()).map(|v| ConfigValue::from(v.as_str()))
        }

        fn children(&self, key: &ConfigKey) -> Vec<String> {
            let mut children: Vec<String> = self
                .0
                .keys()
                .filter_map(|k| key.child_segment(k))
                .map(str::to_string)
                .collect();
            children.dedup();
            children
        }

        fn exists(&self, key: &ConfigKey) -> bool {
            self.0.contains_key(key.as_str()) || !self.children(key).is_empty()
        }
    }

    fn config() -> FlatConfig {
        let mut values = BTreeMap::new();
        values.insert("DomainConnectionStrings:acme".to_string(), "Server=a".to_string());
        values.insert("DomainConnectionStrings:globex".to_string(), String::new());
        FlatConfig(values)
    }

    #[test]
    fn test_value_lookup_through_dyn() {
        let config: &dyn Configuration = &config();
        assert_eq!(
            config.value("DomainConnectionStrings:acme").unwrap().as_str(),
            "Server=a"
        );
        assert!(config.value("DomainConnectionStrings:initech").is_none());
    }

    #[test]
    fn test_section_through_dyn() {
        let config: &dyn Configuration = &config();
        let section = config.section("DomainConnectionStrings");
        assert!(section.exists());
        assert_eq!(section.child_keys(), vec!["acme", "globex"]);
    }

    #[test]
    fn test_configuration_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Configuration>();
    }
}
