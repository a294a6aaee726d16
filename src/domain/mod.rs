// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and provider interfaces.
//!
//! Key paths, values, sections and the binding traits are independent of
//! where configuration comes from. The settings records and the provider
//! traits describe what the rest of an application consumes.

pub mod binding;
pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod providers;
pub mod section;
pub mod settings;

// Re-export commonly used types
pub use binding::{BindSettings, DomainSettings, OptionsSection};
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use providers::{
    DatabaseConnectionProvider, DomainConfigurationProvider, LoggingConfigurationProvider,
    SecurityPolicyProvider,
};
pub use section::ConfigSection;
