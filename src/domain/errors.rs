// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Resolution of domain settings never fails for ordinary absence: missing
//! sections fall back to global defaults. These errors surface from building
//! configuration sources, from policy file I/O (caught and logged by the
//! store), and from the startup validation gate.

use std::num::ParseIntError;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use domaincfg::domain::errors::ConfigError;
///
/// let error = ConfigError::ConfigKeyNotFound {
///     key: "DomainConnectionStrings:acme".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration key not found: DomainConnectionStrings:acme"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key was not found in any source.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reading or writing a domain's security policy file failed.
    #[error("Security policy error for domain '{domain}': {message}")]
    PolicyStoreError {
        /// The domain whose policy was being accessed
        domain: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Startup validation found errors and strict mode is enabled.
    #[error("Configuration validation failed with {} error(s): {}", errors.len(), errors.join("; "))]
    ValidationFailed {
        /// Every error message collected across validators
        errors: Vec<String>,
    },

    /// Installing the structured logging sink failed.
    #[error("Failed to initialize logging: {message}")]
    LoggingInitError {
        /// The error message
        message: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a PolicyStoreError wrapping an underlying error.
    pub fn policy_store(
        domain: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConfigError::PolicyStoreError {
            domain: domain.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
