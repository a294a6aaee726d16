// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic per-domain settings resolution with global fallback.

use crate::domain::settings::{
    EmailSettings, JwtSettings, PasswordPolicySettings, PasswordResetSettings, SmsSettings,
};
use crate::domain::{ConfigKey, ConfigSection, DomainConfigurationProvider, DomainSettings};
use crate::ports::{Configuration, ConfigurationCache};
use std::fmt;
use std::sync::Arc;

/// Turns a configuration section into a settings value.
pub type Binder<T> = Arc<dyn Fn(&ConfigSection<'_>) -> T + Send + Sync>;

/// Resolves `T` for a domain from `{domain_section}:{domain}`, falling back
/// to `{global_section}`.
///
/// Resolved values are cached under keys namespaced by the settings name:
/// `{name}:domain:{domain}` for domains and `{name}:global` for the global
/// fallback. A domain that falls back to the global settings caches them
/// under its own key, so it keeps serving that copy until it is refreshed or
/// the entry expires.
pub struct DomainConfigResolver<T> {
    name: &'static str,
    config: Arc<dyn Configuration>,
    global_section: ConfigKey,
    domain_section: ConfigKey,
    cache: Option<Arc<dyn ConfigurationCache<T>>>,
    binder: Binder<T>,
}

impl<T: Clone + Send + Sync + 'static> DomainConfigResolver<T> {
    /// Creates a resolver with an explicit binder.
    pub fn new(
        name: &'static str,
        config: Arc<dyn Configuration>,
        global_section: impl Into<ConfigKey>,
        domain_section: impl Into<ConfigKey>,
        cache: Option<Arc<dyn ConfigurationCache<T>>>,
        binder: Binder<T>,
    ) -> Self {
        Self {
            name,
            config,
            global_section: global_section.into(),
            domain_section: domain_section.into(),
            cache,
            binder,
        }
    }

    /// Name used in cache keys and log fields.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Section holding the global settings.
    pub fn global_section(&self) -> &ConfigKey {
        &self.global_section
    }

    /// Section whose children are domain overrides.
    pub fn domain_section(&self) -> &ConfigKey {
        &self.domain_section
    }

    /// Cache key for a domain's resolved settings.
    pub fn domain_cache_key(&self, domain: &str) -> String {
        format!("{}:domain:{}", self.name, domain)
    }

    /// Cache key for the global settings.
    pub fn global_cache_key(&self) -> String {
        format!("{}:global", self.name)
    }

    fn cached(&self, key: &str) -> Option<T> {
        self.cache.as_ref().and_then(|cache| cache.try_get(key))
    }

    fn store(&self, key: &str, value: &T) {
        if let Some(cache) = &self.cache {
            cache.set(key, value.clone(), None);
        }
    }
}

impl<T: DomainSettings> DomainConfigResolver<T> {
    /// Creates a resolver for a settings type using its own section names
    /// and binder.
    pub fn for_settings(
        config: Arc<dyn Configuration>,
        cache: Option<Arc<dyn ConfigurationCache<T>>>,
    ) -> Self {
        let binder: Binder<T> = Arc::new(T::from_section);
        Self::new(
            T::NAME,
            config,
            T::GLOBAL_SECTION,
            T::DOMAIN_SECTION,
            cache,
            binder,
        )
    }
}

impl<T: Clone + Send + Sync + 'static> DomainConfigurationProvider<T> for DomainConfigResolver<T> {
    fn settings(&self, domain: &str) -> T {
        let key = self.domain_cache_key(domain);
        if let Some(cached) = self.cached(&key) {
            return cached;
        }

        if let Some(settings) = self.domain_settings(domain) {
            self.store(&key, &settings);
            return settings;
        }

        let settings = self.global_settings();
        tracing::debug!(settings = self.name, domain, "Using global settings for domain");
        self.store(&key, &settings);
        settings
    }

    fn domain_settings(&self, domain: &str) -> Option<T> {
        if domain.is_empty() {
            return None;
        }

        let section = self.config.section(self.domain_section.combine(domain));
        if !section.exists() {
            return None;
        }

        let settings = (self.binder)(&section);
        tracing::debug!(settings = self.name, domain, "Loaded domain-specific settings");
        Some(settings)
    }

    fn global_settings(&self) -> T {
        let key = self.global_cache_key();
        if let Some(cached) = self.cached(&key) {
            return cached;
        }

        let section = self.config.section(self.global_section.clone());
        let settings = (self.binder)(&section);
        self.store(&key, &settings);
        settings
    }

    fn configured_domains(&self) -> Vec<String> {
        self.config.children(&self.domain_section)
    }

    fn refresh(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
        tracing::info!(settings = self.name, "Refreshed all cached settings");
    }

    fn refresh_domain(&self, domain: &str) {
        if let Some(cache) = &self.cache {
            cache.remove(&self.domain_cache_key(domain));
        }
        tracing::info!(settings = self.name, domain, "Refreshed cached settings for domain");
    }
}

impl<T> fmt::Debug for DomainConfigResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainConfigResolver")
            .field("name", &self.name)
            .field("global_section", &self.global_section)
            .field("domain_section", &self.domain_section)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

/// Email settings resolver (`EmailSettings` / `DomainEmailSettings`).
pub type EmailConfigResolver = DomainConfigResolver<EmailSettings>;
/// SMS settings resolver (`SmsSettings` / `DomainSmsSettings`).
pub type SmsConfigResolver = DomainConfigResolver<SmsSettings>;
/// JWT settings resolver (`JwtSettings` / `DomainJwtSettings`).
pub type JwtConfigResolver = DomainConfigResolver<JwtSettings>;
/// Password policy resolver (`PasswordPolicy` / `DomainPasswordPolicy`).
pub type PasswordPolicyResolver = DomainConfigResolver<PasswordPolicySettings>;
/// Password reset resolver (`PasswordResetSettings` / `DomainPasswordResetSettings`).
pub type PasswordResetConfigResolver = DomainConfigResolver<PasswordResetSettings>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryConfigSource;
    use crate::cache::ConfigCache;
    use crate::service::ConfigurationRoot;

    fn setup() -> (MemoryConfigSource, Arc<ConfigurationRoot>, Arc<ConfigCache<EmailSettings>>) {
        let source = MemoryConfigSource::new()
            .with_value("EmailSettings:SmtpServer", "smtp.global.test")
            .with_value("EmailSettings:SenderEmail", "noreply@global.test")
            .with_value("DomainEmailSettings:acme:SmtpServer", "smtp.acme.test")
            .with_value("DomainEmailSettings:acme:SmtpPort", "2525")
            .with_value("DomainEmailSettings:initech", "");
        let root = Arc::new(ConfigurationRoot::from_source(source.clone()));
        (source, root, Arc::new(ConfigCache::new()))
    }

    fn resolver(
        root: &Arc<ConfigurationRoot>,
        cache: &Arc<ConfigCache<EmailSettings>>,
    ) -> EmailConfigResolver {
        let cache: Arc<dyn ConfigurationCache<EmailSettings>> = cache.clone();
        EmailConfigResolver::for_settings(root.clone(), Some(cache))
    }

    #[test]
    fn test_domain_section_overrides_only_that_domain() {
        let (_, root, cache) = setup();
        let resolver = resolver(&root, &cache);

        let acme = resolver.settings("acme");
        assert_eq!(acme.smtp_server, "smtp.acme.test");
        assert_eq!(acme.smtp_port, 2525);
        // Domain sections do not inherit global values
        assert_eq!(acme.sender_email, "");

        let globex = resolver.settings("globex");
        assert_eq!(globex.smtp_server, "smtp.global.test");
        assert_eq!(globex.smtp_port, 587);
    }

    #[test]
    fn test_empty_domain_section_binds_defaults() {
        let (_, root, cache) = setup();
        let resolver = resolver(&root, &cache);

        let initech = resolver.domain_settings("initech").unwrap();
        assert_eq!(initech, EmailSettings::default());
        assert!(resolver.domain_settings("globex").is_none());
        assert!(resolver.domain_settings("").is_none());
    }

    #[test]
    fn test_empty_domain_falls_back_to_global() {
        let (_, root, cache) = setup();
        let resolver = resolver(&root, &cache);
        assert_eq!(resolver.settings("").smtp_server, "smtp.global.test");
    }

    #[test]
    fn test_cache_keys_are_namespaced() {
        let (_, root, cache) = setup();
        let resolver = resolver(&root, &cache);
        assert_eq!(resolver.domain_cache_key("acme"), "EmailSettings:domain:acme");
        assert_eq!(resolver.global_cache_key(), "EmailSettings:global");
        assert_ne!(resolver.domain_cache_key("global"), resolver.global_cache_key());
        assert_ne!(resolver.domain_cache_key("__global__"), resolver.global_cache_key());
    }

    #[test]
    fn test_results_are_cached_until_refresh() {
        let (source, root, cache) = setup();
        let resolver = resolver(&root, &cache);

        assert_eq!(resolver.settings("acme").smtp_server, "smtp.acme.test");
        assert_eq!(resolver.settings("globex").smtp_server, "smtp.global.test");
        assert_eq!(cache.len(), 3);

        source.set("DomainEmailSettings:acme:SmtpServer", "smtp2.acme.test");
        source.set("EmailSettings:SmtpServer", "smtp2.global.test");
        root.reload().unwrap();

        assert_eq!(resolver.settings("acme").smtp_server, "smtp.acme.test");
        assert_eq!(resolver.settings("globex").smtp_server, "smtp.global.test");

        resolver.refresh_domain("acme");
        assert_eq!(resolver.settings("acme").smtp_server, "smtp2.acme.test");
        // Other domains and the global entry stay cached
        assert_eq!(resolver.settings("globex").smtp_server, "smtp.global.test");
        assert_eq!(resolver.global_settings().smtp_server, "smtp.global.test");

        resolver.refresh();
        assert!(cache.is_empty());
        assert_eq!(resolver.settings("globex").smtp_server, "smtp2.global.test");
    }

    #[test]
    fn test_refresh_domain_keeps_fallback_copy_of_global() {
        let (source, root, cache) = setup();
        let resolver = resolver(&root, &cache);

        assert_eq!(resolver.settings("globex").smtp_server, "smtp.global.test");
        source.set("EmailSettings:SmtpServer", "smtp2.global.test");
        root.reload().unwrap();

        // The global sentinel entry is still cached, so the refreshed domain
        // picks up the cached global value
        resolver.refresh_domain("globex");
        assert_eq!(resolver.settings("globex").smtp_server, "smtp.global.test");
    }

    #[test]
    fn test_without_cache_reads_live_configuration() {
        let (source, root, _) = setup();
        let resolver = EmailConfigResolver::for_settings(root.clone(), None);

        assert_eq!(resolver.settings("acme").smtp_server, "smtp.acme.test");
        source.set("DomainEmailSettings:acme:SmtpServer", "smtp2.acme.test");
        root.reload().unwrap();
        assert_eq!(resolver.settings("acme").smtp_server, "smtp2.acme.test");

        resolver.refresh();
        resolver.refresh_domain("acme");
    }

    #[test]
    fn test_configured_domains() {
        let (_, root, cache) = setup();
        let resolver = resolver(&root, &cache);
        assert_eq!(resolver.configured_domains(), vec!["acme", "initech"]);
    }

    #[test]
    fn test_custom_binder_and_sections() {
        let root = Arc::new(ConfigurationRoot::from_source(
            MemoryConfigSource::new()
                .with_value("Features:Signup", "on")
                .with_value("TenantFeatures:acme:Signup", "off"),
        ));
        let binder: Binder<String> =
            Arc::new(|section: &ConfigSection<'_>| section.get_non_empty("Signup").unwrap_or_default());
        let resolver =
            DomainConfigResolver::new("Features", root, "Features", "TenantFeatures", None, binder);

        assert_eq!(resolver.name(), "Features");
        assert_eq!(resolver.global_section().as_str(), "Features");
        assert_eq!(resolver.domain_section().as_str(), "TenantFeatures");
        assert_eq!(resolver.settings("acme"), "off");
        assert_eq!(resolver.settings("globex"), "on");
    }
}
