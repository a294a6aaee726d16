// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup validation of critical settings.
//!
//! Each [`ConfigurationValidator`] inspects one area of the configuration and
//! reports errors (broken functionality) and warnings (likely
//! misconfiguration). [`startup_validation`] runs them all and decides
//! whether startup may continue.

pub mod database;
pub mod email;
pub mod jwt;
pub mod sms;

use crate::domain::{ConfigError, Result};
use crate::options::ConfigurationOptions;
use crate::ports::Configuration;

/// Errors and warnings produced by one validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Problems that break the feature.
    pub errors: Vec<String>,
    /// Problems worth reporting that do not fail validation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates an empty, valid result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// The validators run at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationValidator {
    /// `EmailSettings`
    Email,
    /// `SmsSettings`
    Sms,
    /// `JwtSettings`
    Jwt,
    /// `DomainConnectionStrings`
    Database,
}

impl ConfigurationValidator {
    /// Every validator, in the order they run.
    pub const ALL: [ConfigurationValidator; 4] = [
        ConfigurationValidator::Email,
        ConfigurationValidator::Sms,
        ConfigurationValidator::Jwt,
        ConfigurationValidator::Database,
    ];

    /// Name of the configuration area, used as the log prefix.
    pub fn name(self) -> &'static str {
        match self {
            ConfigurationValidator::Email => email::SECTION,
            ConfigurationValidator::Sms => sms::SECTION,
            ConfigurationValidator::Jwt => jwt::SECTION,
            ConfigurationValidator::Database => database::SECTION,
        }
    }

    /// Runs the checks against `config`.
    pub fn validate(self, config: &dyn Configuration) -> ValidationResult {
        match self {
            ConfigurationValidator::Email => email::validate(config),
            ConfigurationValidator::Sms => sms::validate(config),
            ConfigurationValidator::Jwt => jwt::validate(config),
            ConfigurationValidator::Database => database::validate(config),
        }
    }
}

/// Aggregated results of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Per-validator results, in run order.
    pub results: Vec<(ConfigurationValidator, ValidationResult)>,
}

impl ValidationReport {
    /// Returns `true` when no validator reported an error.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_valid())
    }

    /// Returns `true` when any validator reported an error.
    pub fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    /// Every error, prefixed with its validator name.
    pub fn errors(&self) -> Vec<String> {
        self.prefixed(|result| &result.errors)
    }

    /// Every warning, prefixed with its validator name.
    pub fn warnings(&self) -> Vec<String> {
        self.prefixed(|result| &result.warnings)
    }

    /// The result for one validator, if it ran.
    pub fn result(&self, validator: ConfigurationValidator) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(v, _)| *v == validator)
            .map(|(_, result)| result)
    }

    fn prefixed(&self, pick: impl Fn(&ValidationResult) -> &Vec<String>) -> Vec<String> {
        self.results
            .iter()
            .flat_map(|(validator, result)| {
                pick(result)
                    .iter()
                    .map(move |message| format!("[{}] {}", validator.name(), message))
            })
            .collect()
    }
}

/// Runs `validators` and logs every finding.
///
/// Warnings log at warn. Errors log at error when `fail_on_errors` is set and
/// at warn otherwise.
pub fn validate_configuration(
    config: &dyn Configuration,
    validators: &[ConfigurationValidator],
    fail_on_errors: bool,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for &validator in validators {
        let result = validator.validate(config);

        for warning in &result.warnings {
            tracing::warn!(config = validator.name(), "[{}] {}", validator.name(), warning);
        }
        for error in &result.errors {
            if fail_on_errors {
                tracing::error!(config = validator.name(), "[{}] {}", validator.name(), error);
            } else {
                tracing::warn!(
                    config = validator.name(),
                    "[{}] Validation error (non-fatal): {}",
                    validator.name(),
                    error
                );
            }
        }

        report.results.push((validator, result));
    }

    report
}

/// Runs every validator according to `options`.
///
/// Returns an empty report when `validate_on_startup` is off. Returns
/// [`ConfigError::ValidationFailed`] only when errors were found and
/// `fail_on_validation_errors` is on.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::MemoryConfigSource;
/// use domaincfg::options::ConfigurationOptions;
/// use domaincfg::service::ConfigurationRoot;
/// use domaincfg::validation::startup_validation;
///
/// let root = ConfigurationRoot::from_source(MemoryConfigSource::new());
///
/// let lenient = ConfigurationOptions::default();
/// let report = startup_validation(&root, &lenient).unwrap();
/// assert!(report.has_errors());
///
/// let strict = ConfigurationOptions {
///     fail_on_validation_errors: true,
///     ..ConfigurationOptions::default()
/// };
/// assert!(startup_validation(&root, &strict).is_err());
/// ```
pub fn startup_validation(
    config: &dyn Configuration,
    options: &ConfigurationOptions,
) -> Result<ValidationReport> {
    if !options.validate_on_startup {
        tracing::debug!("Startup validation disabled");
        return Ok(ValidationReport::default());
    }

    let strict = options.fail_on_validation_errors;
    let report = validate_configuration(config, &ConfigurationValidator::ALL, strict);

    if report.has_errors() && strict {
        tracing::error!("Configuration validation failed. Application startup aborted.");
        return Err(ConfigError::ValidationFailed {
            errors: report.errors(),
        });
    }

    if report.is_valid() {
        tracing::info!("Configuration validation passed");
    } else {
        tracing::warn!("Configuration validation completed with warnings/errors (non-fatal mode)");
    }
    Ok(report)
}
