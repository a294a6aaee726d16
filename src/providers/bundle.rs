// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-call assembly of every provider.

use super::{
    DatabaseConnectionResolver, DomainConfigResolver, LoggingConfigResolver, SecurityPolicyStore,
};
use crate::cache::ConfigCache;
use crate::domain::settings::{
    DatabaseSettings, EmailConfirmationSettings, EmailSettings, JwtSettings,
    MobileConfirmationSettings, MockServiceSettings, OtpSettings, PasswordPolicySettings,
    PasswordResetSettings, SmsSettings,
};
use crate::domain::{
    DatabaseConnectionProvider, DomainConfigurationProvider, DomainSettings,
    LoggingConfigurationProvider, OptionsSection, SecurityPolicyProvider,
};
use crate::options::ConfigurationOptions;
use crate::ports::{Configuration, ConfigurationCache};
use std::sync::Arc;

/// Every provider and option record, built from one configuration.
///
/// Each domain resolver gets its own cache when caching is enabled.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::options::ConfigurationOptions;
/// use domaincfg::providers::ConfigurationProviders;
/// use domaincfg::service::ConfigurationRoot;
/// use std::sync::Arc;
///
/// let root = ConfigurationRoot::from_source(
///     MemoryConfigSource::new()
///         .with_value("JwtSettings:Issuer", "auth")
///         .with_value("DomainJwtSettings:acme:Issuer", "acme-auth")
///         .with_value("OtpSettings:CodeLength", "8"),
/// );
/// let providers = ConfigurationProviders::build(Arc::new(root), &ConfigurationOptions::default());
///
/// assert_eq!(providers.jwt.settings("acme").issuer, "acme-auth");
/// assert_eq!(providers.jwt.settings("globex").issuer, "auth");
/// assert_eq!(providers.otp.code_length, 8);
/// ```
pub struct ConfigurationProviders {
    /// Email settings per domain.
    pub email: Arc<dyn DomainConfigurationProvider<EmailSettings>>,
    /// SMS settings per domain.
    pub sms: Arc<dyn DomainConfigurationProvider<SmsSettings>>,
    /// JWT settings per domain.
    pub jwt: Arc<dyn DomainConfigurationProvider<JwtSettings>>,
    /// Password policy per domain.
    pub password_policy: Arc<dyn DomainConfigurationProvider<PasswordPolicySettings>>,
    /// Password reset settings per domain.
    pub password_reset: Arc<dyn DomainConfigurationProvider<PasswordResetSettings>>,
    /// Connection strings per domain.
    pub database: Arc<dyn DatabaseConnectionProvider>,
    /// File-backed security policies.
    pub security_policy: Arc<dyn SecurityPolicyProvider>,
    /// Logging settings.
    pub logging: Arc<dyn LoggingConfigurationProvider>,
    /// OTP options.
    pub otp: OtpSettings,
    /// Mock service switches.
    pub mock_services: MockServiceSettings,
    /// Email confirmation options.
    pub email_confirmation: EmailConfirmationSettings,
    /// Mobile confirmation options.
    pub mobile_confirmation: MobileConfirmationSettings,
    /// Database options.
    pub database_settings: DatabaseSettings,
    /// The options the bundle was built with.
    pub options: ConfigurationOptions,
}

impl ConfigurationProviders {
    /// Builds every provider over `config`.
    pub fn build(config: Arc<dyn Configuration>, options: &ConfigurationOptions) -> Self {
        tracing::debug!(
            caching = options.enable_caching,
            policy_path = %options.security_policy_base_path,
            "Building configuration providers"
        );

        Self {
            email: Arc::new(resolver::<EmailSettings>(&config, options)),
            sms: Arc::new(resolver::<SmsSettings>(&config, options)),
            jwt: Arc::new(resolver::<JwtSettings>(&config, options)),
            password_policy: Arc::new(resolver::<PasswordPolicySettings>(&config, options)),
            password_reset: Arc::new(resolver::<PasswordResetSettings>(&config, options)),
            database: Arc::new(DatabaseConnectionResolver::new(config.clone())),
            security_policy: Arc::new(SecurityPolicyStore::new(&options.security_policy_base_path)),
            logging: Arc::new(LoggingConfigResolver::new(config.clone())),
            otp: bind_options(config.as_ref()),
            mock_services: bind_options(config.as_ref()),
            email_confirmation: bind_options(config.as_ref()),
            mobile_confirmation: bind_options(config.as_ref()),
            database_settings: bind_options(config.as_ref()),
            options: options.clone(),
        }
    }

    /// Drops every cached domain setting, security policy and the logging
    /// tree.
    pub fn refresh_all(&self) {
        self.email.refresh();
        self.sms.refresh();
        self.jwt.refresh();
        self.password_policy.refresh();
        self.password_reset.refresh();
        self.security_policy.invalidate_all_caches();
        self.logging.refresh();
    }
}

fn resolver<T: DomainSettings>(
    config: &Arc<dyn Configuration>,
    options: &ConfigurationOptions,
) -> DomainConfigResolver<T> {
    let cache = options.enable_caching.then(|| {
        let cache: Arc<dyn ConfigurationCache<T>> =
            Arc::new(ConfigCache::with_ttl(options.cache_expiration));
        cache
    });
    DomainConfigResolver::for_settings(config.clone(), cache)
}

fn bind_options<T: OptionsSection>(config: &dyn Configuration) -> T {
    config.section(T::SECTION).bind()
}

impl std::fmt::Debug for ConfigurationProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationProviders")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
