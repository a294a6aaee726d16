// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging settings resolution and category level queries.

use crate::domain::settings::{
    ConsoleSinkSettings, FileSinkSettings, LogLevel, LoggingSettings, MinimumLevelSettings,
};
use crate::domain::{ConfigSection, LoggingConfigurationProvider};
use crate::ports::Configuration;
use std::sync::{Arc, Mutex, PoisonError};

const DEFAULT_LEVEL: &str = "Information";

/// Returns the level that applies to `category`.
///
/// An exact (case-sensitive) override wins. Otherwise the longest override
/// key that prefixes the category is used. The prefix comparison folds case
/// for all of Unicode, not just ASCII. Without a match the default level
/// applies.
///
/// # Examples
///
/// ```rust
/// use domaincfg::domain::settings::MinimumLevelSettings;
/// use domaincfg::providers::level_for_category;
/// use std::collections::BTreeMap;
///
/// let levels = MinimumLevelSettings {
///     default: "Information".to_string(),
///     overrides: BTreeMap::from([
///         ("Microsoft".to_string(), "Warning".to_string()),
///         ("Microsoft.AspNetCore".to_string(), "Error".to_string()),
///     ]),
/// };
///
/// assert_eq!(level_for_category(&levels, "Microsoft.AspNetCore.Routing"), "Error");
/// assert_eq!(level_for_category(&levels, "Microsoft.Other"), "Warning");
/// assert_eq!(level_for_category(&levels, "App"), "Information");
/// ```
pub fn level_for_category<'s>(levels: &'s MinimumLevelSettings, category: &str) -> &'s str {
    if let Some(level) = levels.overrides.get(category) {
        return level;
    }

    let folded = category.to_lowercase();
    let mut best: Option<(&String, &String)> = None;
    for (prefix, level) in &levels.overrides {
        let matches = folded.starts_with(&prefix.to_lowercase());
        if matches && best.map_or(true, |(current, _)| prefix.len() > current.len()) {
            best = Some((prefix, level));
        }
    }

    best.map_or(levels.default.as_str(), |(_, level)| level.as_str())
}

/// Returns `true` if `requested` is at least as severe as `threshold`.
///
/// Unrecognized names on either side rank as `Information`.
pub fn is_level_enabled(threshold: &str, requested: &str) -> bool {
    LogLevel::rank_of(requested) >= LogLevel::rank_of(threshold)
}

/// Builds [`LoggingSettings`] from the `Serilog` and `Logging` sections and
/// keeps the result until [`refresh`](LoggingConfigurationProvider::refresh).
pub struct LoggingConfigResolver {
    config: Arc<dyn Configuration>,
    cached: Mutex<Option<Arc<LoggingSettings>>>,
}

impl LoggingConfigResolver {
    /// Creates a resolver over `config`.
    pub fn new(config: Arc<dyn Configuration>) -> Self {
        Self {
            config,
            cached: Mutex::new(None),
        }
    }

    /// Reads the logging settings tree from the configuration.
    pub fn build_settings(config: &dyn Configuration) -> LoggingSettings {
        let mut settings = LoggingSettings::default();

        let serilog = config.section("Serilog");
        if serilog.exists() {
            let target = &mut settings.serilog;

            let minimum = serilog.section("MinimumLevel");
            if minimum.exists() {
                target.minimum_level.default = minimum
                    .get_non_empty("Default")
                    .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

                let overrides = minimum.section("Override");
                if overrides.exists() {
                    target.minimum_level.overrides = overrides.to_map(DEFAULT_LEVEL);
                }
            }

            serilog.bind_list("Using", &mut target.using);
            serilog.bind_list("Enrich", &mut target.enrich);

            let properties = serilog.section("Properties");
            if properties.exists() {
                target.properties = properties.to_map("");
            }

            for sink in serilog.section("WriteTo").children() {
                let name = sink.get("Name").map(String::from).unwrap_or_default();
                let args = sink.section("Args");
                if name.eq_ignore_ascii_case("Console") {
                    target.console = Some(console_sink(&args));
                } else if name.eq_ignore_ascii_case("File") {
                    target.file = Some(file_sink(&args));
                } else {
                    tracing::debug!(sink = %name, "Ignoring unsupported log sink");
                }
            }
        }

        let log_level = config.section("Logging").section("LogLevel");
        if log_level.exists() {
            settings.logging.log_level = log_level.to_map(DEFAULT_LEVEL);
        }

        settings
    }
}

fn console_sink(args: &ConfigSection<'_>) -> ConsoleSinkSettings {
    ConsoleSinkSettings {
        enabled: true,
        output_template: args.get_non_empty("outputTemplate"),
        theme: args.get_non_empty("theme"),
        restricted_to_minimum_level: args.get_non_empty("restrictedToMinimumLevel"),
    }
}

fn file_sink(args: &ConfigSection<'_>) -> FileSinkSettings {
    let mut sink = FileSinkSettings {
        enabled: true,
        path: args
            .get_non_empty("path")
            .unwrap_or_else(|| "Logs/app-.log".to_string()),
        rolling_interval: args
            .get_non_empty("rollingInterval")
            .unwrap_or_else(|| "Day".to_string()),
        output_template: args.get_non_empty("outputTemplate"),
        restricted_to_minimum_level: args.get_non_empty("restrictedToMinimumLevel"),
        shared: args.get_bool("shared").unwrap_or(false),
        buffered: args.get_bool("buffered").unwrap_or(false),
        ..FileSinkSettings::default()
    };
    args.bind_opt_parsed("fileSizeLimitBytes", &mut sink.file_size_limit_bytes);
    args.bind_opt_parsed("retainedFileCountLimit", &mut sink.retained_file_count_limit);
    sink
}

impl LoggingConfigurationProvider for LoggingConfigResolver {
    fn settings(&self) -> Arc<LoggingSettings> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(settings) = cached.as_ref() {
            return Arc::clone(settings);
        }

        let settings = Arc::new(Self::build_settings(self.config.as_ref()));
        tracing::debug!(
            overrides = settings.serilog.minimum_level.overrides.len(),
            "Built logging settings"
        );
        *cached = Some(Arc::clone(&settings));
        settings
    }

    fn log_level_for_category(&self, category: &str) -> String {
        let settings = self.settings();
        level_for_category(&settings.serilog.minimum_level, category).to_string()
    }

    fn is_enabled(&self, category: &str, level: &str) -> bool {
        is_level_enabled(&self.log_level_for_category(category), level)
    }

    fn refresh(&self) {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::info!("Logging settings refreshed");
    }
}

impl std::fmt::Debug for LoggingConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let built = self
            .cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("LoggingConfigResolver")
            .field("built", &built)
            .finish()
    }
}
