// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregated configuration root.
//!
//! [`ConfigurationRoot`] merges several [`ConfigSource`]s into one
//! hierarchical view and implements the [`Configuration`] reader that every
//! provider consumes.

use crate::domain::config_key::compare_segments;
use crate::domain::{ConfigKey, ConfigSection, ConfigValue, Result};
use crate::ports::{ConfigSource, Configuration};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, PoisonError, RwLock};

type Snapshot = Arc<BTreeMap<String, String>>;

/// Merged view over a prioritized list of configuration sources.
///
/// Sources with higher priority override lower ones key by key. Among sources
/// with equal priority the one added first wins. Values are merged into a
/// snapshot on first access; the snapshot is rebuilt after
/// [`reload`](Self::reload) or [`add_source`](Self::add_source).
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::service::ConfigurationRoot;
///
/// # fn main() -> domaincfg::domain::Result<()> {
/// let root = ConfigurationRoot::builder()
///     .with_source(Box::new(
///         MemoryConfigSource::new().with_value("JwtSettings:Issuer", "defaults"),
///     ))
///     .with_source(Box::new(
///         MemoryConfigSource::new()
///             .with_priority(2)
///             .with_value("JwtSettings:Issuer", "override"),
///     ))
///     .build()?;
///
/// assert_eq!(root.value("JwtSettings:Issuer").unwrap().as_str(), "override");
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationRoot {
    /// Sources, maintained in priority order (highest first)
    sources: RwLock<Vec<Box<dyn ConfigSource>>>,
    /// Merged values, built lazily
    snapshot: RwLock<Option<Snapshot>>,
}

impl ConfigurationRoot {
    /// Creates an empty configuration root.
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
            snapshot: RwLock::new(None),
        }
    }

    /// Creates a configuration root builder.
    pub fn builder() -> ConfigurationRootBuilder {
        ConfigurationRootBuilder::new()
    }

    /// Creates a root over a single source.
    pub fn from_source(source: impl ConfigSource + 'static) -> Self {
        let root = Self::new();
        root.add_source(Box::new(source));
        root
    }

    /// Creates a root with the default sources: environment variables and,
    /// when present, `appsettings.yaml` and `appsettings.json` in the OS
    /// configuration directory for the application.
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        let mut builder = Self::builder();

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_vars();
        }

        #[cfg(feature = "yaml")]
        {
            use crate::adapters::YamlFileAdapter;
            match YamlFileAdapter::from_default_location(app_name, qualifier, "appsettings.yaml") {
                Ok(adapter) => builder = builder.with_source(Box::new(adapter)),
                Err(e) => tracing::debug!(error = %e, "No default YAML configuration file"),
            }
        }

        {
            use crate::adapters::JsonFileAdapter;
            match JsonFileAdapter::from_default_location(app_name, qualifier, "appsettings.json") {
                Ok(adapter) => builder = builder.with_source(Box::new(adapter)),
                Err(e) => tracing::debug!(error = %e, "No default JSON configuration file"),
            }
        }

        builder.build()
    }

    /// Adds a source and invalidates the merged snapshot.
    pub fn add_source(&self, source: Box<dyn ConfigSource>) {
        {
            let mut sources = self.sources.write().unwrap_or_else(PoisonError::into_inner);
            tracing::debug!(
                source = source.name(),
                priority = source.priority(),
                "Adding configuration source"
            );
            sources.push(source);
            sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        }
        self.invalidate();
    }

    /// Names of the registered sources, highest priority first.
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Reloads every source and discards the merged snapshot.
    ///
    /// A source that fails to reload is logged and keeps serving its
    /// previous values.
    pub fn reload(&self) -> Result<()> {
        {
            let mut sources = self.sources.write().unwrap_or_else(PoisonError::into_inner);
            for source in sources.iter_mut() {
                if let Err(e) = source.reload() {
                    tracing::warn!(source = source.name(), error = %e, "Failed to reload source");
                }
            }
        }
        self.invalidate();
        tracing::info!("Configuration reloaded");
        Ok(())
    }

    /// Returns a view of the subtree rooted at `path`.
    pub fn section(&self, path: impl Into<ConfigKey>) -> ConfigSection<'_> {
        ConfigSection::new(self, path.into())
    }

    /// Convenience lookup by string path.
    pub fn value(&self, path: &str) -> Option<ConfigValue> {
        self.get_value(&ConfigKey::from(path))
    }

    fn invalidate(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn snapshot(&self) -> Snapshot {
        if let Some(snapshot) = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(snapshot);
        }

        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(snapshot) = guard.as_ref() {
            return Arc::clone(snapshot);
        }
        let merged = Arc::new(self.merge());
        *guard = Some(Arc::clone(&merged));
        merged
    }

    fn merge(&self) -> BTreeMap<String, String> {
        let sources = self.sources.read().unwrap_or_else(PoisonError::into_inner);
        let mut merged = BTreeMap::new();

        // Lowest priority first so that higher priorities overwrite
        for source in sources.iter().rev() {
            match source.entries() {
                Ok(entries) => merged.extend(entries),
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Skipping unreadable source");
                }
            }
        }

        tracing::debug!(keys = merged.len(), sources = sources.len(), "Merged configuration");
        merged
    }

    /// Iterates over the keys that start with `key` as a string prefix.
    fn prefixed<'m>(
        values: &'m BTreeMap<String, String>,
        key: &'m ConfigKey,
    ) -> impl Iterator<Item = &'m String> + 'm {
        values
            .range::<str, _>((Bound::Excluded(key.as_str()), Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(move |k| k.starts_with(key.as_str()))
    }
}

impl Default for ConfigurationRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigurationRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationRoot")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl Configuration for ConfigurationRoot {
    fn get_value(&self, key: &ConfigKey) -> Option<ConfigValue> {
        self.snapshot()
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str()))
    }

    fn children(&self, key: &ConfigKey) -> Vec<String> {
        let snapshot = self.snapshot();
        let mut children: Vec<String> = Self::prefixed(&snapshot, key)
            .filter_map(|k| key.child_segment(k))
            .map(str::to_string)
            .collect();
        children.sort_by(|a, b| compare_segments(a, b));
        children.dedup();
        children
    }

    fn exists(&self, key: &ConfigKey) -> bool {
        let snapshot = self.snapshot();
        if key.is_root() {
            return !snapshot.is_empty();
        }
        snapshot.contains_key(key.as_str())
            || Self::prefixed(&snapshot, key).any(|k| key.child_segment(k).is_some())
    }
}

/// Builder for constructing a [`ConfigurationRoot`].
///
/// # Examples
///
/// ```rust
/// use domaincfg::service::ConfigurationRootBuilder;
///
/// # fn main() -> domaincfg::domain::Result<()> {
/// let root = ConfigurationRootBuilder::new()
///     .with_env_prefix("AUTHAPI_")
///     .with_cli_args(vec!["--JwtSettings:KeyType=rsa"])
///     .build()?;
/// assert_eq!(root.source_names(), vec!["cli", "env"]);
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationRootBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationRootBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds in-memory values at the lowest priority.
    pub fn with_values<K, V>(self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        use crate::adapters::MemoryConfigSource;
        self.with_source(Box::new(MemoryConfigSource::from_pairs(values)))
    }

    /// Adds every environment variable as a source.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::new()))
    }

    /// Adds environment variables starting with `prefix` as a source.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::with_prefix(prefix)))
    }

    /// Adds command-line arguments as a source.
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineAdapter;
        self.with_source(Box::new(CommandLineAdapter::from_args(args)))
    }

    /// Adds a YAML file as a source.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileAdapter;
        let adapter = YamlFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Adds a JSON file as a source.
    pub fn with_json_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::JsonFileAdapter;
        let adapter = JsonFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Builds the configuration root.
    pub fn build(self) -> Result<ConfigurationRoot> {
        let root = ConfigurationRoot::new();
        for source in self.sources {
            root.add_source(source);
        }
        Ok(root)
    }
}

impl Default for ConfigurationRootBuilder {
    fn default() -> Self {
        Self::new()
    }
}
