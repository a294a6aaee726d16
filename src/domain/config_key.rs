// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical configuration key paths.
//!
//! Keys address a node in the configuration tree using `:` as the segment
//! delimiter, for example `DomainEmailSettings:acme:SmtpServer`. Keys are
//! case-sensitive.

use std::cmp::Ordering;
use std::fmt;

/// The delimiter between path segments.
pub const KEY_DELIMITER: char = ':';

/// A type-safe, `:`-delimited configuration path.
///
/// The empty key addresses the root of the tree.
///
/// # Examples
///
/// ```
/// use domaincfg::domain::ConfigKey;
///
/// let section = ConfigKey::from("DomainEmailSettings");
/// let key = section.combine("acme").combine("SmtpServer");
///
/// assert_eq!(key.as_str(), "DomainEmailSettings:acme:SmtpServer");
/// assert_eq!(key.last_segment(), "SmtpServer");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// The root key, addressing the whole configuration tree.
    pub fn root() -> Self {
        ConfigKey(String::new())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` for the root key.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a relative path below this key.
    ///
    /// ```
    /// use domaincfg::domain::ConfigKey;
    ///
    /// assert_eq!(ConfigKey::root().combine("Serilog").as_str(), "Serilog");
    /// assert_eq!(
    ///     ConfigKey::from("Serilog").combine("MinimumLevel:Default").as_str(),
    ///     "Serilog:MinimumLevel:Default"
    /// );
    /// ```
    pub fn combine(&self, relative: &str) -> ConfigKey {
        if self.is_root() {
            ConfigKey(relative.to_string())
        } else if relative.is_empty() {
            self.clone()
        } else {
            ConfigKey(format!("{}{}{}", self.0, KEY_DELIMITER, relative))
        }
    }

    /// Iterates over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_DELIMITER).filter(|s| !s.is_empty())
    }

    /// Returns the final path segment, or `""` for the root key.
    pub fn last_segment(&self) -> &str {
        self.0
            .rsplit_once(KEY_DELIMITER)
            .map_or(self.0.as_str(), |(_, last)| last)
    }

    /// Returns the parent key, or `None` for the root.
    pub fn parent(&self) -> Option<ConfigKey> {
        if self.is_root() {
            return None;
        }
        Some(
            self.0
                .rsplit_once(KEY_DELIMITER)
                .map_or_else(ConfigKey::root, |(parent, _)| ConfigKey::from(parent)),
        )
    }

    /// If `descendant` lies strictly below this key, returns the first
    /// segment of the remaining path.
    ///
    /// ```
    /// use domaincfg::domain::ConfigKey;
    ///
    /// let prefix = ConfigKey::from("DomainSmsSettings");
    /// assert_eq!(prefix.child_segment("DomainSmsSettings:acme:Provider"), Some("acme"));
    /// assert_eq!(prefix.child_segment("DomainSmsSettingsX:acme"), None);
    /// assert_eq!(prefix.child_segment("DomainSmsSettings"), None);
    /// ```
    pub fn child_segment<'k>(&self, descendant: &'k str) -> Option<&'k str> {
        let rest = if self.is_root() {
            descendant
        } else {
            descendant
                .strip_prefix(self.as_str())?
                .strip_prefix(KEY_DELIMITER)?
        };
        let segment = rest.split(KEY_DELIMITER).next()?;
        (!segment.is_empty()).then_some(segment)
    }
}

/// Orders sibling segments the way configuration children are listed:
/// numeric segments (array indices) by value and before named ones,
/// everything else lexically.
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
