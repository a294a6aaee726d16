// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait definitions.
//!
//! These are the interfaces application code depends on. The concrete
//! implementations live in [`crate::providers`]; tests and hosts may supply
//! their own.

use crate::domain::settings::{LoggingSettings, SecurityPolicy, SerilogSettings, StandardLoggingSettings};
use std::sync::Arc;

/// Resolves a settings record per domain, falling back to global defaults.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::domain::settings::SmsSettings;
/// use domaincfg::domain::DomainConfigurationProvider;
/// use domaincfg::providers::DomainConfigResolver;
/// use domaincfg::service::ConfigurationRoot;
/// use std::sync::Arc;
///
/// let root = ConfigurationRoot::from_source(
///     MemoryConfigSource::new()
///         .with_value("SmsSettings:TwilioPhoneNumber", "+15550000")
///         .with_value("DomainSmsSettings:acme:TwilioPhoneNumber", "+15551111"),
/// );
/// let sms = DomainConfigResolver::<SmsSettings>::for_settings(Arc::new(root), None);
///
/// assert_eq!(sms.settings("acme").twilio_phone_number, "+15551111");
/// assert_eq!(sms.settings("globex").twilio_phone_number, "+15550000");
/// ```
pub trait DomainConfigurationProvider<T>: Send + Sync {
    /// Returns the effective settings for `domain`.
    ///
    /// Never fails: a domain without an override section resolves to the
    /// global settings.
    fn settings(&self, domain: &str) -> T;

    /// Returns the domain override alone, or `None` if the domain has no
    /// section.
    fn domain_settings(&self, domain: &str) -> Option<T>;

    /// Returns the global settings.
    fn global_settings(&self) -> T;

    /// Lists the domains that have an override section.
    fn configured_domains(&self) -> Vec<String>;

    /// Drops every cached entry for this settings type.
    fn refresh(&self);

    /// Drops the cached entry for one domain.
    fn refresh_domain(&self, domain: &str);
}

/// Per-domain security policies backed by JSON files.
pub trait SecurityPolicyProvider: Send + Sync {
    /// Returns the policy for `domain`, falling back to the shared default
    /// file and then the built-in policy.
    fn policy(&self, domain: &str) -> SecurityPolicy;

    /// Persists `policy` for `domain`. Returns `false` if it could not be
    /// written.
    fn update_policy(&self, domain: &str, policy: &SecurityPolicy) -> bool;

    /// Drops the cached policy for one domain.
    fn invalidate_cache(&self, domain: &str);

    /// Drops every cached policy.
    fn invalidate_all_caches(&self);

    /// Lists the domains that have a policy file.
    fn configured_domains(&self) -> Vec<String>;
}

/// Logging settings and category level queries.
pub trait LoggingConfigurationProvider: Send + Sync {
    /// The full logging settings tree.
    fn settings(&self) -> Arc<LoggingSettings>;

    /// The `Serilog` part of the tree.
    fn serilog_settings(&self) -> SerilogSettings {
        self.settings().serilog.clone()
    }

    /// The `Logging` part of the tree.
    fn standard_logging_settings(&self) -> StandardLoggingSettings {
        self.settings().logging.clone()
    }

    /// Returns the level name that applies to `category`.
    fn log_level_for_category(&self, category: &str) -> String;

    /// Returns `true` if events at `level` are enabled for `category`.
    fn is_enabled(&self, category: &str, level: &str) -> bool;

    /// Discards the settings tree so the next read rebuilds it.
    fn refresh(&self);
}

/// Per-domain database connection strings.
pub trait DatabaseConnectionProvider: Send + Sync {
    /// Returns the connection string for `domain`, if one is configured.
    fn connection_string(&self, domain: &str) -> Option<String>;

    /// Returns `true` if a non-empty connection string exists for `domain`.
    fn has_connection_string(&self, domain: &str) -> bool;

    /// Lists the domains with a connection string entry.
    fn configured_domains(&self) -> Vec<String>;
}
