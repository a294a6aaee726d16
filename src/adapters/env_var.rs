// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! Variable names map to key paths by replacing the `__` separator with
//! `:`, so `DomainEmailSettings__acme__SmtpServer` addresses
//! `DomainEmailSettings:acme:SmtpServer`. Names are otherwise kept as-is.

use crate::domain::config_key::KEY_DELIMITER;
use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::BTreeMap;
use std::env;
use std::sync::{PoisonError, RwLock};

/// Separator standing in for `:` in variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Maximum length for environment variable keys
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// # Priority
///
/// Environment variables have a priority of 2: they override files (1) and
/// are overridden by command-line arguments (3).
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::EnvVarAdapter;
/// use domaincfg::ports::ConfigSource;
/// use std::collections::BTreeMap;
///
/// let adapter = EnvVarAdapter::with_values(BTreeMap::from([(
///     "JwtSettings:Issuer".to_string(),
///     "auth".to_string(),
/// )]));
/// assert_eq!(adapter.get_str("JwtSettings:Issuer").unwrap().unwrap().as_str(), "auth");
///
/// // Only read variables such as AUTHAPI_JwtSettings__Issuer
/// let adapter = EnvVarAdapter::with_prefix("AUTHAPI_");
/// ```
#[derive(Debug)]
pub struct EnvVarAdapter {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to map `__` to `:`
    replace_separator: bool,
    /// Values were supplied up front and are never re-read
    injected: bool,
    /// Lazily loaded variables
    cache: RwLock<Option<BTreeMap<String, String>>>,
}

impl EnvVarAdapter {
    /// Creates an adapter reading every environment variable.
    pub fn new() -> Self {
        Self {
            prefix: None,
            replace_separator: true,
            injected: false,
            cache: RwLock::new(None),
        }
    }

    /// Creates an adapter reading only variables that start with `prefix`.
    ///
    /// The prefix is stripped from the key.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether `__` in variable names maps to the `:` delimiter.
    pub fn replace_separator(mut self, enabled: bool) -> Self {
        self.replace_separator = enabled;
        self
    }

    /// Creates an adapter with pre-populated values instead of the process
    /// environment.
    ///
    /// Keys are used exactly as given and [`reload`](ConfigSource::reload)
    /// keeps them.
    pub fn with_values(values: BTreeMap<String, String>) -> Self {
        Self {
            prefix: None,
            replace_separator: false,
            injected: true,
            cache: RwLock::new(Some(values)),
        }
    }

    /// Maps a variable name to a key path, or `None` if it is filtered out.
    fn map_key(&self, name: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };
        if name.is_empty() {
            return None;
        }
        if self.replace_separator {
            Some(name.replace(ENV_SEPARATOR, &KEY_DELIMITER.to_string()))
        } else {
            Some(name.to_string())
        }
    }

    fn load(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();

        for (name, value) in env::vars() {
            if name.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    key_len = name.len(),
                    value_len = value.len(),
                    "Skipping oversized environment variable"
                );
                continue;
            }
            if let Some(key) = self.map_key(&name) {
                values.insert(key, value);
            }
        }

        tracing::debug!(
            count = values.len(),
            prefix = ?self.prefix,
            "Loaded environment variables"
        );

        values
    }

    fn with_cache<R>(&self, f: impl FnOnce(&BTreeMap<String, String>) -> R) -> R {
        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(values) = guard.as_ref() {
                return f(values);
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let values = guard.get_or_insert_with(|| self.load());
        f(values)
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.with_cache(|values| {
            values
                .get(key.as_str())
                .map(|v| ConfigValue::from(v.as_str()))
        }))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.with_cache(|values| values.keys().map(|k| ConfigKey::from(k.as_str())).collect()))
    }

    fn reload(&mut self) -> Result<()> {
        if self.injected {
            return Ok(());
        }
        *self.cache.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sets variables for the lifetime of the guard
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_adapter_metadata() {
        let adapter = EnvVarAdapter::default();
        assert_eq!(adapter.name(), "env");
        assert_eq!(adapter.priority(), 2);
    }

    #[test]
    fn test_env_adapter_maps_double_underscore() {
        let mut guard = EnvGuard::new();
        guard.set("DCFGTEST1_DomainSmsSettings__acme__Provider", "Twilio");

        let adapter = EnvVarAdapter::with_prefix("DCFGTEST1_");
        let value = adapter.get_str("DomainSmsSettings:acme:Provider").unwrap();
        assert_eq!(value.unwrap().as_str(), "Twilio");
    }

    #[test]
    fn test_env_adapter_single_underscore_kept() {
        let mut guard = EnvGuard::new();
        guard.set("DCFGTEST2_MOCK_ENABLED", "true");

        let adapter = EnvVarAdapter::with_prefix("DCFGTEST2_");
        assert!(adapter.get_str("MOCK_ENABLED").unwrap().is_some());
        assert!(adapter.get_str("MOCK:ENABLED").unwrap().is_none());
    }

    #[test]
    fn test_env_adapter_prefix_filters() {
        let mut guard = EnvGuard::new();
        guard.set("DCFGTEST3_OtpSettings__CodeLength", "8");
        guard.set("DCFGOTHER3_OtpSettings__CodeLength", "4");

        let adapter = EnvVarAdapter::with_prefix("DCFGTEST3_");
        let keys = adapter.all_keys().unwrap();
        assert_eq!(keys, vec![ConfigKey::from("OtpSettings:CodeLength")]);
    }

    #[test]
    fn test_env_adapter_no_replace_separator() {
        let mut guard = EnvGuard::new();
        guard.set("DCFGTEST4_A__B", "value");

        let adapter = EnvVarAdapter::with_prefix("DCFGTEST4_").replace_separator(false);
        assert!(adapter.get_str("A__B").unwrap().is_some());
    }

    #[test]
    fn test_env_adapter_reload() {
        let mut guard = EnvGuard::new();
        guard.set("DCFGTEST5_Key", "initial");

        let mut adapter = EnvVarAdapter::with_prefix("DCFGTEST5_");
        assert_eq!(adapter.get_str("Key").unwrap().unwrap().as_str(), "initial");

        guard.set("DCFGTEST5_Key", "updated");
        assert_eq!(adapter.get_str("Key").unwrap().unwrap().as_str(), "initial");

        adapter.reload().unwrap();
        assert_eq!(adapter.get_str("Key").unwrap().unwrap().as_str(), "updated");
    }

    #[test]
    fn test_env_adapter_with_values() {
        let adapter = EnvVarAdapter::with_values(BTreeMap::from([(
            "DomainConnectionStrings:acme".to_string(),
            "Server=a".to_string(),
        )]));
        assert_eq!(adapter.all_keys().unwrap().len(), 1);

        let mut adapter = adapter;
        adapter.reload().unwrap();
        assert!(adapter.get_str("DomainConnectionStrings:acme").unwrap().is_some());
    }
}
