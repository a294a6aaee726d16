// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging settings tree and level ordering.
//!
//! The tree mirrors the `Serilog` and `Logging` configuration sections:
//! a default minimum level with per-namespace overrides, optional console
//! and file sinks, enrichers and free-form properties.

use crate::domain::{ConfigError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Rank used for level names that are not recognized.
pub const UNKNOWN_LEVEL_RANK: u8 = 2;

static LEVEL_RANKS: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("verbose", 0),
        ("trace", 0),
        ("debug", 1),
        ("information", 2),
        ("warning", 3),
        ("error", 4),
        ("fatal", 5),
        ("none", 6),
    ])
});

/// Severity levels, ordered from most to least verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum LogLevel {
    /// Everything, including trace output.
    Verbose,
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    #[default]
    Information,
    /// Unexpected but handled.
    Warning,
    /// Failed operations.
    Error,
    /// Unrecoverable failures.
    Fatal,
    /// Logging disabled.
    None,
}

impl LogLevel {
    /// Numeric rank of a level name (`Verbose`/`Trace` 0 through `None` 6),
    /// matched case-insensitively. Unknown names rank as `Information`.
    ///
    /// ```
    /// use domaincfg::domain::settings::LogLevel;
    ///
    /// assert_eq!(LogLevel::rank_of("trace"), 0);
    /// assert_eq!(LogLevel::rank_of("WARNING"), 3);
    /// assert_eq!(LogLevel::rank_of("loud"), 2);
    /// ```
    pub fn rank_of(name: &str) -> u8 {
        LEVEL_RANKS
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(UNKNOWN_LEVEL_RANK)
    }

    /// The numeric rank of this level.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parses a level name, also accepting the `Info`, `Warn` and
    /// `Critical` aliases. Returns `None` for anything else.
    pub fn parse_lenient(name: &str) -> Option<LogLevel> {
        match name.trim().to_ascii_lowercase().as_str() {
            "verbose" | "trace" => Some(LogLevel::Verbose),
            "debug" => Some(LogLevel::Debug),
            "information" | "info" => Some(LogLevel::Information),
            "warning" | "warn" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            "fatal" | "critical" => Some(LogLevel::Fatal),
            "none" | "off" => Some(LogLevel::None),
            _ => None,
        }
    }

    /// Canonical level name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
            LogLevel::None => "None",
        }
    }

    /// The `tracing` filter directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Verbose => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Information => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Fatal => "error",
            LogLevel::None => "off",
        }
    }

    /// The equivalent `tracing` level filter. `Fatal` maps to `ERROR`.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Verbose => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Information => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Fatal => LevelFilter::ERROR,
            LogLevel::None => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        LogLevel::parse_lenient(s).ok_or_else(|| ConfigError::ParseError {
            message: format!("Unknown log level '{}'", s),
            source: None,
        })
    }
}

/// The complete logging settings tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Structured logger settings (`Serilog` section).
    pub serilog: SerilogSettings,
    /// Framework log levels (`Logging` section).
    pub logging: StandardLoggingSettings,
}

/// Structured logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerilogSettings {
    /// Default level and per-namespace overrides.
    pub minimum_level: MinimumLevelSettings,
    /// Console sink, if configured.
    pub console: Option<ConsoleSinkSettings>,
    /// File sink, if configured.
    pub file: Option<FileSinkSettings>,
    /// Properties attached to every event.
    pub properties: BTreeMap<String, String>,
    /// Sink assemblies to load.
    pub using: Vec<String>,
    /// Enricher names.
    pub enrich: Vec<String>,
}

/// Default level plus per-namespace overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinimumLevelSettings {
    /// Level applied when no override matches.
    pub default: String,
    /// Namespace prefix to level name.
    #[serde(rename = "override")]
    pub overrides: BTreeMap<String, String>,
}

impl Default for MinimumLevelSettings {
    fn default() -> Self {
        Self {
            default: "Information".to_string(),
            overrides: BTreeMap::from([
                ("Microsoft.AspNetCore".to_string(), "Warning".to_string()),
                ("Microsoft.AspNetCore.Hosting".to_string(), "Warning".to_string()),
                ("Microsoft.AspNetCore.Routing".to_string(), "Warning".to_string()),
                ("System".to_string(), "Warning".to_string()),
            ]),
        }
    }
}

/// Console sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleSinkSettings {
    /// Whether the sink is active.
    pub enabled: bool,
    /// Message template.
    pub output_template: Option<String>,
    /// Color theme name.
    pub theme: Option<String>,
    /// Sink-level minimum.
    pub restricted_to_minimum_level: Option<String>,
}

impl Default for ConsoleSinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_template: None,
            theme: None,
            restricted_to_minimum_level: None,
        }
    }
}

/// Rolling file sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSinkSettings {
    /// Whether the sink is active.
    pub enabled: bool,
    /// Log file path.
    pub path: String,
    /// Roll interval name (`Day`, `Hour`, ...).
    pub rolling_interval: String,
    /// Size at which the file rolls.
    pub file_size_limit_bytes: Option<i64>,
    /// Number of rolled files kept.
    pub retained_file_count_limit: Option<i32>,
    /// Message template.
    pub output_template: Option<String>,
    /// Buffer writes.
    pub buffered: bool,
    /// Allow other processes to write the same file.
    pub shared: bool,
    /// Sink-level minimum.
    pub restricted_to_minimum_level: Option<String>,
    /// Roll when the size limit is reached.
    pub roll_on_file_size_limit: bool,
}

impl Default for FileSinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "Logs/app-.log".to_string(),
            rolling_interval: "Day".to_string(),
            file_size_limit_bytes: Some(10_485_760),
            retained_file_count_limit: Some(31),
            output_template: None,
            buffered: false,
            shared: false,
            restricted_to_minimum_level: None,
            roll_on_file_size_limit: true,
        }
    }
}

/// Framework-style `Logging:LogLevel` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardLoggingSettings {
    /// Category to level name.
    pub log_level: BTreeMap<String, String>,
}

impl Default for StandardLoggingSettings {
    fn default() -> Self {
        Self {
            log_level: BTreeMap::from([
                ("Default".to_string(), "Information".to_string()),
                ("Microsoft.AspNetCore".to_string(), "Warning".to_string()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_matches_enum_order() {
        for level in [
            LogLevel::Verbose,
            LogLevel::Debug,
            LogLevel::Information,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
            LogLevel::None,
        ] {
            assert_eq!(LogLevel::rank_of(level.as_str()), level.rank());
        }
    }

    #[test]
    fn test_strict_rank_does_not_accept_aliases() {
        assert_eq!(LogLevel::rank_of("Trace"), 0);
        assert_eq!(LogLevel::rank_of("warn"), UNKNOWN_LEVEL_RANK);
        assert_eq!(LogLevel::rank_of("critical"), UNKNOWN_LEVEL_RANK);
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Information);
        assert_eq!("Warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(LogLevel::Verbose.to_level_filter(), LevelFilter::TRACE);
        assert_eq!(LogLevel::Fatal.to_level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::None.to_level_filter(), LevelFilter::OFF);
    }

    #[test]
    fn test_default_overrides() {
        let min = MinimumLevelSettings::default();
        assert_eq!(min.default, "Information");
        assert_eq!(min.overrides.len(), 4);
        assert_eq!(min.overrides.get("System"), Some(&"Warning".to_string()));
    }
}
