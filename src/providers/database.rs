// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-domain database connection strings.

use crate::domain::{ConfigKey, DatabaseConnectionProvider};
use crate::ports::Configuration;
use std::sync::Arc;

/// Section holding one connection string per domain.
pub const DEFAULT_CONNECTION_STRINGS_SECTION: &str = "DomainConnectionStrings";

/// Reads connection strings from `{section}:{domain}`.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::domain::DatabaseConnectionProvider;
/// use domaincfg::providers::DatabaseConnectionResolver;
/// use domaincfg::service::ConfigurationRoot;
/// use std::sync::Arc;
///
/// let root = ConfigurationRoot::from_source(
///     MemoryConfigSource::new().with_value("DomainConnectionStrings:acme", "Host=db;Database=acme"),
/// );
/// let connections = DatabaseConnectionResolver::new(Arc::new(root));
///
/// assert_eq!(
///     connections.connection_string("acme").as_deref(),
///     Some("Host=db;Database=acme")
/// );
/// assert!(!connections.has_connection_string("globex"));
/// ```
#[derive(Clone)]
pub struct DatabaseConnectionResolver {
    config: Arc<dyn Configuration>,
    section: ConfigKey,
}

impl DatabaseConnectionResolver {
    /// Creates a resolver over the `DomainConnectionStrings` section.
    pub fn new(config: Arc<dyn Configuration>) -> Self {
        Self::with_section(config, DEFAULT_CONNECTION_STRINGS_SECTION)
    }

    /// Creates a resolver over a custom section.
    pub fn with_section(config: Arc<dyn Configuration>, section: impl Into<ConfigKey>) -> Self {
        Self {
            config,
            section: section.into(),
        }
    }

    /// The section connection strings are read from.
    pub fn section(&self) -> &ConfigKey {
        &self.section
    }

    fn lookup(&self, domain: &str) -> Option<String> {
        self.config
            .get_value(&self.section.combine(domain))
            .and_then(|value| value.non_empty().map(str::to_string))
    }
}

impl DatabaseConnectionProvider for DatabaseConnectionResolver {
    fn connection_string(&self, domain: &str) -> Option<String> {
        if domain.is_empty() {
            tracing::warn!("Attempted to get connection string with an empty domain");
            return None;
        }

        let connection_string = self.lookup(domain);
        if connection_string.is_none() {
            tracing::warn!(domain, "No connection string configured for domain");
        }
        connection_string
    }

    fn has_connection_string(&self, domain: &str) -> bool {
        !domain.is_empty() && self.lookup(domain).is_some()
    }

    fn configured_domains(&self) -> Vec<String> {
        self.config.children(&self.section)
    }
}

impl std::fmt::Debug for DatabaseConnectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnectionResolver")
            .field("section", &self.section)
            .finish()
    }
}
