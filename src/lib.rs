// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain-aware configuration resolution for multi-tenant services.
//!
//! Settings such as email, SMS, JWT and password policy are resolved per
//! domain (tenant) from a `Domain{Settings}:{domain}` section, falling back
//! to the global `{Settings}` section. Resolved values are cached with a
//! time-to-live and can be refreshed per domain or wholesale. Security
//! policies are stored as one JSON file per domain, and logging levels are
//! answered by longest-prefix category matching.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: keys, values, errors, settings records, binding and
//!   the provider traits
//! - **Ports**: the seams (`ConfigSource`, `Configuration`,
//!   `ConfigurationCache`, `ConfigParser`)
//! - **Adapters**: configuration sources (YAML, JSON, environment, command
//!   line, in-memory)
//! - **Service**: the `ConfigurationRoot` that merges sources by priority
//! - **Providers**: domain resolvers, connection strings, the policy store
//!   and logging settings
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//! - `subscriber`: Install a `tracing-subscriber` sink from the logging
//!   settings
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use domaincfg::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> domaincfg::domain::Result<()> {
//! let root = ConfigurationRoot::builder()
//!     .with_source(Box::new(
//!         MemoryConfigSource::new()
//!             .with_value("EmailSettings:SmtpServer", "smtp.example.test")
//!             .with_value("DomainEmailSettings:acme:SmtpServer", "smtp.acme.test"),
//!     ))
//!     .build()?;
//! let config: Arc<dyn Configuration> = Arc::new(root);
//!
//! let options = ConfigurationOptions::from_configuration(config.as_ref());
//! let providers = ConfigurationProviders::build(config, &options);
//!
//! assert_eq!(providers.email.settings("acme").smtp_server, "smtp.acme.test");
//! assert_eq!(providers.email.settings("globex").smtp_server, "smtp.example.test");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cache;
pub mod domain;
pub mod options;
pub mod ports;
pub mod providers;
pub mod service;
pub mod telemetry;
pub mod validation;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{JsonFileAdapter, MemoryConfigSource};
    pub use crate::cache::ConfigCache;
    pub use crate::domain::{
        BindSettings, ConfigError, ConfigKey, ConfigSection, ConfigValue,
        DatabaseConnectionProvider, DomainConfigurationProvider, DomainSettings,
        LoggingConfigurationProvider, Result, SecurityPolicyProvider,
    };
    pub use crate::options::ConfigurationOptions;
    pub use crate::ports::{ConfigParser, ConfigSource, Configuration, ConfigurationCache};
    pub use crate::providers::{
        ConfigurationProviders, DatabaseConnectionResolver, DomainConfigResolver,
        LoggingConfigResolver, SecurityPolicyStore,
    };
    pub use crate::service::{ConfigurationRoot, ConfigurationRootBuilder};
    pub use crate::validation::{startup_validation, ConfigurationValidator, ValidationReport};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineAdapter;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
