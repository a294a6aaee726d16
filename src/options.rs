// SPDX-License-Identifier: MIT OR Apache-2.0

//! Options controlling how the providers are assembled.

use crate::domain::{BindSettings, ConfigSection, OptionsSection};
use crate::ports::Configuration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Section the options are bound from.
pub const OPTIONS_SECTION: &str = "DomainConfiguration";

/// Library-level switches for caching, startup validation and the policy
/// store location.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::options::ConfigurationOptions;
/// use domaincfg::service::ConfigurationRoot;
/// use std::time::Duration;
///
/// let root = ConfigurationRoot::from_source(
///     MemoryConfigSource::new()
///         .with_value("DomainConfiguration:CacheExpiration", "00:01:30")
///         .with_value("DomainConfiguration:FailOnValidationErrors", "true"),
/// );
/// let options = ConfigurationOptions::from_configuration(&root);
///
/// assert_eq!(options.cache_expiration, Duration::from_secs(90));
/// assert!(options.fail_on_validation_errors);
/// assert!(options.enable_caching);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationOptions {
    /// Give each domain resolver its own cache.
    pub enable_caching: bool,
    /// Lifetime of cached settings, written as `[d.]hh:mm:ss[.fff]`.
    #[serde(with = "time_span")]
    pub cache_expiration: Duration,
    /// Run the validators at startup.
    pub validate_on_startup: bool,
    /// Turn validation errors into a startup failure.
    pub fail_on_validation_errors: bool,
    /// Directory holding per-domain security policy files.
    pub security_policy_base_path: String,
}

impl Default for ConfigurationOptions {
    fn default() -> Self {
        Self {
            enable_caching: true,
            cache_expiration: Duration::from_secs(5 * 60),
            validate_on_startup: true,
            fail_on_validation_errors: false,
            security_policy_base_path: "Configuration".to_string(),
        }
    }
}

impl ConfigurationOptions {
    /// Binds the options from the `DomainConfiguration` section.
    pub fn from_configuration(config: &dyn Configuration) -> Self {
        config.section(OPTIONS_SECTION).bind()
    }
}

impl BindSettings for ConfigurationOptions {
    const NAME: &'static str = "ConfigurationOptions";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_bool("EnableCaching", &mut self.enable_caching);
        if let Some(text) = section.get_non_empty("CacheExpiration") {
            match parse_time_span(&text) {
                Some(duration) => self.cache_expiration = duration,
                None => tracing::debug!(value = %text, "Ignoring unparsable cache expiration"),
            }
        }
        section.bind_bool("ValidateOnStartup", &mut self.validate_on_startup);
        section.bind_bool("FailOnValidationErrors", &mut self.fail_on_validation_errors);
        section.bind_string("SecurityPolicyBasePath", &mut self.security_policy_base_path);
    }
}

impl OptionsSection for ConfigurationOptions {
    const SECTION: &'static str = OPTIONS_SECTION;
}

/// Parses a `[d.]hh:mm:ss[.fraction]` duration.
///
/// ```
/// use domaincfg::options::parse_time_span;
/// use std::time::Duration;
///
/// assert_eq!(parse_time_span("00:05:00"), Some(Duration::from_secs(300)));
/// assert_eq!(parse_time_span("1.02:00:00"), Some(Duration::from_secs(26 * 3600)));
/// assert_eq!(parse_time_span("00:00:01.5"), Some(Duration::from_millis(1500)));
/// assert_eq!(parse_time_span("five minutes"), None);
/// ```
pub fn parse_time_span(text: &str) -> Option<Duration> {
    let mut parts = text.trim().split(':');
    let first = parts.next()?;
    let (days, hours) = match first.split_once('.') {
        Some((days, hours)) => (days.parse::<u64>().ok()?, hours.parse::<u64>().ok()?),
        None => (0, first.parse::<u64>().ok()?),
    };
    let minutes = parts.next()?.parse::<u64>().ok()?;
    let seconds_text = parts.next()?;
    if parts.next().is_some() || hours > 23 || minutes > 59 {
        return None;
    }

    let (whole, fraction) = match seconds_text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds_text, None),
    };
    let seconds = whole.parse::<u64>().ok()?;
    if seconds > 59 {
        return None;
    }

    let nanos = match fraction {
        Some(digits) if !digits.is_empty() && digits.len() <= 9 => {
            let value = digits.parse::<u32>().ok()?;
            value * 10u32.pow(9 - digits.len() as u32)
        }
        Some(_) => return None,
        None => 0,
    };

    let total = days
        .checked_mul(24)?
        .checked_add(hours)?
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?;
    Some(Duration::new(total, nanos))
}

/// Formats a duration as `[d.]hh:mm:ss[.fffffff]`.
pub fn format_time_span(duration: Duration) -> String {
    let total = duration.as_secs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, minutes, seconds) = (rest / 3600, rest % 3600 / 60, rest % 60);

    let mut text = if days > 0 {
        format!("{}.{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    };
    if duration.subsec_nanos() > 0 {
        let fraction = format!("{:09}", duration.subsec_nanos());
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

mod time_span {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time_span(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_time_span(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time span '{}'", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryConfigSource;
    use crate::service::ConfigurationRoot;

    #[test]
    fn test_defaults() {
        let options = ConfigurationOptions::default();
        assert!(options.enable_caching);
        assert_eq!(options.cache_expiration, Duration::from_secs(300));
        assert!(options.validate_on_startup);
        assert!(!options.fail_on_validation_errors);
        assert_eq!(options.security_policy_base_path, "Configuration");
    }

    #[test]
    fn test_bind_from_section() {
        let root = ConfigurationRoot::from_source(
            MemoryConfigSource::new()
                .with_value("DomainConfiguration:EnableCaching", "False")
                .with_value("DomainConfiguration:CacheExpiration", "bogus")
                .with_value("DomainConfiguration:ValidateOnStartup", "maybe")
                .with_value("DomainConfiguration:SecurityPolicyBasePath", "/etc/policies"),
        );
        let options = ConfigurationOptions::from_configuration(&root);

        assert!(!options.enable_caching);
        assert_eq!(options.cache_expiration, Duration::from_secs(300));
        assert!(options.validate_on_startup);
        assert_eq!(options.security_policy_base_path, "/etc/policies");
    }

    #[test]
    fn test_time_span_rejects_out_of_range() {
        assert_eq!(parse_time_span("00:60:00"), None);
        assert_eq!(parse_time_span("24:00:00"), None);
        assert_eq!(parse_time_span("00:00:60"), None);
        assert_eq!(parse_time_span("00:00"), None);
        assert_eq!(parse_time_span("00:00:00:00"), None);
        assert_eq!(parse_time_span("00:00:01."), None);
    }

    #[test]
    fn test_time_span_rejects_overflowing_days() {
        assert_eq!(parse_time_span("999999999999999999.00:00:00"), None);
        assert_eq!(
            parse_time_span("213503982334601.07:00:15"),
            Some(Duration::from_secs(u64::MAX))
        );
        assert_eq!(parse_time_span("213503982334601.07:00:16"), None);

        let root = ConfigurationRoot::from_source(MemoryConfigSource::new().with_value(
            "DomainConfiguration:CacheExpiration",
            "999999999999999999.00:00:00",
        ));
        let options = ConfigurationOptions::from_configuration(&root);
        assert_eq!(options.cache_expiration, Duration::from_secs(300));
    }

    #[test]
    fn test_format_time_span() {
        assert_eq!(format_time_span(Duration::from_secs(300)), "00:05:00");
        assert_eq!(format_time_span(Duration::from_secs(90_061)), "1.01:01:01");
        assert_eq!(format_time_span(Duration::from_millis(1500)), "00:00:01.5");
    }

    #[test]
    fn test_serde_uses_time_span_text() {
        let json = serde_json::to_string(&ConfigurationOptions::default()).unwrap();
        assert!(json.contains("\"cacheExpiration\":\"00:05:00\""));

        let options: ConfigurationOptions =
            serde_json::from_str(r#"{"cacheExpiration": "00:00:30", "enableCaching": false}"#)
                .unwrap();
        assert_eq!(options.cache_expiration, Duration::from_secs(30));
        assert!(!options.enable_caching);
        assert_eq!(options.security_policy_base_path, "Configuration");

        assert!(serde_json::from_str::<ConfigurationOptions>(r#"{"cacheExpiration": 5}"#).is_err());
    }
}
