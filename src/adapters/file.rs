// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed configuration source.
//!
//! The adapter reads one file, hands it to a [`ConfigParser`] and serves the
//! resulting flat key paths. The format-specific parsers live in the `yaml`
//! and `json` modules.

use crate::domain::config_key::KEY_DELIMITER;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for configuration files (10MB).
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Joins a parent path and a child segment with the key delimiter.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_DELIMITER, segment)
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Configuration source reading a single file through a parser.
///
/// # Priority
///
/// Files have a priority of 1: they override in-memory values and are
/// overridden by environment variables (2) and command-line arguments (3).
///
/// # Examples
///
/// ```rust,no_run
/// use domaincfg::adapters::JsonFileAdapter;
/// use domaincfg::ports::ConfigSource;
///
/// let adapter = JsonFileAdapter::from_file("appsettings.json").unwrap();
/// assert_eq!(adapter.name(), "json-file");
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigAdapter<P> {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
    parser: P,
}

impl<P: ConfigParser + Default> FileConfigAdapter<P> {
    /// Loads a file using the parser's default instance.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_parser(path, P::default())
    }

    /// Loads `filename` from the OS configuration directory of the
    /// application identified by `qualifier` and `app_name`.
    ///
    /// ```rust,no_run
    /// use domaincfg::adapters::JsonFileAdapter;
    ///
    /// let adapter =
    ///     JsonFileAdapter::from_default_location("authapi", "com.example", "appsettings.json")
    ///         .unwrap();
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let parser = P::default();
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: parser.source_name().to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::with_parser(proj_dirs.config_dir().join(filename), parser)
    }
}

impl<P: ConfigParser> FileConfigAdapter<P> {
    /// Loads a file with an explicit parser.
    pub fn with_parser(path: impl AsRef<Path>, parser: P) -> Result<Self> {
        let file_path = path.as_ref();
        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: parser.source_name().to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(file_path)),
            source: Some(Box::new(e)),
        })?;

        let values = Self::read_values(&canonical_path, &parser)?;
        tracing::debug!(
            source = parser.source_name(),
            path = %canonical_path.display(),
            keys = values.len(),
            "Loaded configuration file"
        );

        Ok(Self {
            file_path: canonical_path,
            values,
            parser,
        })
    }

    /// Returns the canonical path of the file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_values(path: &Path, parser: &P) -> Result<BTreeMap<String, String>> {
        let source_error = |message: String, e: std::io::Error| ConfigError::SourceError {
            source_name: parser.source_name().to_string(),
            message,
            source: Some(Box::new(e)),
        };

        let metadata = fs::metadata(path).map_err(|e| {
            source_error(
                format!("Failed to read file metadata: {}", display_name(path)),
                e,
            )
        })?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: parser.source_name().to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(path).map_err(|e| {
            source_error(
                format!("Failed to read configuration file: {}", display_name(path)),
                e,
            )
        })?;

        parser.parse(&content)
    }
}

impl<P: ConfigParser> ConfigSource for FileConfigAdapter<P> {
    fn name(&self) -> &str {
        self.parser.source_name()
    }

    fn priority(&self) -> u8 {
        1
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        self.values = Self::read_values(&self.file_path, &self.parser)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonParser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "Serilog"), "Serilog");
        assert_eq!(join_path("Serilog", "Using"), "Serilog:Using");
    }

    #[test]
    fn test_file_adapter_reads_and_reloads() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"OtpSettings": {{"CodeLength": 6}}}}"#).unwrap();

        let mut adapter = FileConfigAdapter::<JsonParser>::from_file(temp_file.path()).unwrap();
        assert_eq!(adapter.name(), "json-file");
        assert_eq!(adapter.priority(), 1);
        assert_eq!(
            adapter.get_str("OtpSettings:CodeLength").unwrap().unwrap().as_str(),
            "6"
        );

        fs::write(temp_file.path(), r#"{"OtpSettings": {"CodeLength": 8}}"#).unwrap();
        adapter.reload().unwrap();
        assert_eq!(
            adapter.get_str("OtpSettings:CodeLength").unwrap().unwrap().as_str(),
            "8"
        );
    }

    #[test]
    fn test_file_adapter_missing_file() {
        let result = FileConfigAdapter::<JsonParser>::from_file("/nonexistent/appsettings.json");
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
    }

    #[test]
    fn test_file_adapter_reload_keeps_values_on_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"A": "1"}}"#).unwrap();
        let mut adapter = FileConfigAdapter::<JsonParser>::from_file(temp_file.path()).unwrap();

        fs::write(temp_file.path(), "{ broken").unwrap();
        assert!(adapter.reload().is_err());
        assert_eq!(adapter.get_str("A").unwrap().unwrap().as_str(), "1");
    }
}
