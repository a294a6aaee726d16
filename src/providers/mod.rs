// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete implementations of the provider traits in
//! [`crate::domain::providers`].

pub mod bundle;
pub mod database;
pub mod domain_resolver;
pub mod logging;
pub mod security_policy;

pub use bundle::ConfigurationProviders;
pub use database::{DatabaseConnectionResolver, DEFAULT_CONNECTION_STRINGS_SECTION};
pub use domain_resolver::{
    Binder, DomainConfigResolver, EmailConfigResolver, JwtConfigResolver,
    PasswordPolicyResolver, PasswordResetConfigResolver, SmsConfigResolver,
};
pub use logging::{is_level_enabled, level_for_category, LoggingConfigResolver};
pub use security_policy::{SecurityPolicyStore, POLICY_FILE_NAME};
