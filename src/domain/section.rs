// SPDX-License-Identifier: MIT OR Apache-2.0

//! A view over one subtree of the configuration.
//!
//! Sections are cheap to create and borrow the underlying [`Configuration`].
//! Binding reads go through the `bind_*` helpers, which assign a field only
//! when the key is present and parses; anything else keeps the field's
//! current (default) value.

use crate::domain::binding::BindSettings;
use crate::domain::{ConfigKey, ConfigValue};
use crate::ports::Configuration;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A borrowed view of the configuration subtree rooted at [`path`](Self::path).
#[derive(Clone)]
pub struct ConfigSection<'a> {
    config: &'a dyn Configuration,
    path: ConfigKey,
}

impl<'a> ConfigSection<'a> {
    /// Creates a section view at `path`.
    pub fn new(config: &'a dyn Configuration, path: ConfigKey) -> Self {
        Self { config, path }
    }

    /// The full path of this section.
    pub fn path(&self) -> &ConfigKey {
        &self.path
    }

    /// The last segment of the path.
    pub fn key(&self) -> &str {
        self.path.last_segment()
    }

    /// The value stored directly at this section's path.
    pub fn value(&self) -> Option<ConfigValue> {
        self.config.get_value(&self.path)
    }

    /// Returns `true` if the section has a value or any descendant.
    pub fn exists(&self) -> bool {
        self.config.exists(&self.path)
    }

    /// Reads the value at a path relative to this section.
    pub fn get(&self, relative: &str) -> Option<ConfigValue> {
        self.config.get_value(&self.path.combine(relative))
    }

    /// Reads a relative value, treating an empty string as absent.
    pub fn get_non_empty(&self, relative: &str) -> Option<String> {
        self.get(relative)
            .and_then(|v| v.non_empty().map(str::to_string))
    }

    /// Returns the sub-section at a relative path.
    pub fn section(&self, relative: &str) -> ConfigSection<'a> {
        ConfigSection::new(self.config, self.path.combine(relative))
    }

    /// Returns the immediate child segments of this section.
    pub fn child_keys(&self) -> Vec<String> {
        self.config.children(&self.path)
    }

    /// Returns the immediate child sections.
    pub fn children(&self) -> Vec<ConfigSection<'a>> {
        self.child_keys()
            .iter()
            .map(|key| self.section(key))
            .collect()
    }

    /// Parses a relative value, returning `None` when it is absent, empty or
    /// does not parse.
    pub fn get_parsed<T>(&self, relative: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.get_non_empty(relative)?;
        match raw.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!(
                    key = %self.path.combine(relative),
                    value = %raw,
                    error = %e,
                    "Ignoring unparsable configuration value"
                );
                None
            }
        }
    }

    /// Reads a relative boolean, accepting `true/false` in any case.
    pub fn get_bool(&self, relative: &str) -> Option<bool> {
        let value = self.get(relative)?;
        if value.is_empty() {
            return None;
        }
        match value.as_bool(self.path.combine(relative).as_str()) {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparsable boolean");
                None
            }
        }
    }

    /// Returns the non-empty values of the immediate children, in order.
    ///
    /// Used for list-shaped sections such as `Serilog:Enrich`.
    pub fn values(&self) -> Vec<String> {
        self.children()
            .iter()
            .filter_map(|child| child.value().and_then(|v| v.non_empty().map(str::to_string)))
            .collect()
    }

    /// Returns the immediate children as a key/value map, with `default`
    /// standing in for missing values.
    pub fn to_map(&self, default: &str) -> BTreeMap<String, String> {
        self.children()
            .into_iter()
            .map(|child| {
                let value = child
                    .value()
                    .map(String::from)
                    .unwrap_or_else(|| default.to_string());
                (child.key().to_string(), value)
            })
            .collect()
    }

    /// Binds this section into a fresh default instance of `T`.
    pub fn bind<T: BindSettings>(&self) -> T {
        let mut target = T::default();
        target.bind(self);
        target
    }

    /// Binds this section onto an existing instance.
    pub fn bind_into<T: BindSettings>(&self, target: &mut T) {
        target.bind(self);
    }

    /// Assigns a string field if the key is present.
    pub fn bind_string(&self, relative: &str, target: &mut String) {
        if let Some(value) = self.get(relative) {
            *target = value.into();
        }
    }

    /// Assigns an optional string field if the key is present and non-empty.
    pub fn bind_opt_string(&self, relative: &str, target: &mut Option<String>) {
        if let Some(value) = self.get_non_empty(relative) {
            *target = Some(value);
        }
    }

    /// Assigns a parsed field if the key is present and parses.
    pub fn bind_parsed<T>(&self, relative: &str, target: &mut T)
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        if let Some(value) = self.get_parsed(relative) {
            *target = value;
        }
    }

    /// Assigns an optional parsed field if the key is present and parses.
    pub fn bind_opt_parsed<T>(&self, relative: &str, target: &mut Option<T>)
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        if let Some(value) = self.get_parsed(relative) {
            *target = Some(value);
        }
    }

    /// Assigns a boolean field if the key is present and parses.
    pub fn bind_bool(&self, relative: &str, target: &mut bool) {
        if let Some(value) = self.get_bool(relative) {
            *target = value;
        }
    }

    /// Replaces a list field with the child values when the sub-section
    /// exists.
    pub fn bind_list(&self, relative: &str, target: &mut Vec<String>) {
        let list = self.section(relative);
        if list.exists() {
            *target = list.values();
        }
    }

    /// Binds a nested record when the sub-section exists.
    pub fn bind_nested<T: BindSettings>(&self, relative: &str, target: &mut T) {
        let nested = self.section(relative);
        if nested.exists() {
            target.bind(&nested);
        }
    }
}

impl fmt::Debug for ConfigSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSection")
            .field("path", &self.path.as_str())
            .finish()
    }
}
