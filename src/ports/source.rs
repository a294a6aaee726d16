// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! A source exposes a flat map of full `:`-delimited key paths to string
//! values. The configuration root merges several sources and derives the
//! hierarchical view (sections, children, existence) from those paths.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A trait for configuration sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single configuration root is
/// shared by every provider in the process.
///
/// # Priority
///
/// Higher priority values take precedence when two sources provide the same
/// key. The built-in adapters use:
///
/// - **3**: Command-line arguments
/// - **2**: Environment variables
/// - **1**: Configuration files
/// - **0**: In-memory values
///
/// # Examples
///
/// ```rust
/// use domaincfg::ports::ConfigSource;
/// use domaincfg::domain::{ConfigKey, ConfigValue, Result};
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "EmailSettings:SmtpPort").then(|| ConfigValue::from("587")))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("EmailSettings:SmtpPort")])
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let entries = Defaults.entries().unwrap();
/// assert_eq!(entries, vec![("EmailSettings:SmtpPort".to_string(), "587".to_string())]);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source, used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the priority of this configuration source.
    fn priority(&self) -> u8;

    /// Retrieves the value stored at the given full key path.
    ///
    /// Returns `Ok(None)` when this source has no value for the key.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns every key path this source holds a value for.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Re-reads the underlying storage.
    ///
    /// Sources that cannot change at runtime implement this as a no-op.
    fn reload(&mut self) -> Result<()>;

    /// Retrieves a value using a string key path.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get(&ConfigKey::from(key))
    }

    /// Returns every key/value pair held by this source.
    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for key in self.all_keys()? {
            if let Some(value) = self.get(&key)? {
                entries.push((key.into_string(), value.into()));
            }
        }
        Ok(entries)
    }
}
