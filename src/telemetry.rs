// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging sink driven by [`SerilogSettings`].
//!
//! [`filter_directives`] is always available. Installing a subscriber needs
//! the `subscriber` feature.

use crate::domain::settings::{LogLevel, SerilogSettings};

/// Renders the minimum levels as an `EnvFilter` directive string.
///
/// The default level comes first, followed by one `target=level` entry per
/// override with `.` namespace separators turned into `::`. Unrecognized
/// level names fall back to `info`.
///
/// ```
/// use domaincfg::domain::settings::SerilogSettings;
/// use domaincfg::telemetry::filter_directives;
///
/// let mut settings = SerilogSettings::default();
/// settings.minimum_level.default = "Debug".to_string();
/// settings.minimum_level.overrides.clear();
/// settings
///     .minimum_level
///     .overrides
///     .insert("Microsoft.AspNetCore".to_string(), "Warning".to_string());
///
/// assert_eq!(filter_directives(&settings), "debug,Microsoft::AspNetCore=warn");
/// ```
pub fn filter_directives(settings: &SerilogSettings) -> String {
    let level = |name: &str| {
        LogLevel::parse_lenient(name)
            .unwrap_or_default()
            .as_directive()
    };

    let mut directives = vec![level(&settings.minimum_level.default).to_string()];
    directives.extend(
        settings
            .minimum_level
            .overrides
            .iter()
            .map(|(target, name)| format!("{}={}", target.replace('.', "::"), level(name))),
    );
    directives.join(",")
}

#[cfg(feature = "subscriber")]
mod sink {
    use super::filter_directives;
    use crate::domain::settings::{LogLevel, SerilogSettings};
    use crate::domain::{ConfigError, Result};
    use std::fs::{self, OpenOptions};
    use std::path::Path;
    use std::sync::Mutex;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter, Layer};

    fn sink_level(restricted: Option<&str>) -> LevelFilter {
        restricted
            .and_then(LogLevel::parse_lenient)
            .map_or(LevelFilter::TRACE, LogLevel::to_level_filter)
    }

    /// Installs a global `tracing` subscriber with the console and file sinks
    /// described by `settings`.
    ///
    /// Fails if the filter does not parse, the log file cannot be opened, or
    /// a global subscriber is already installed.
    pub fn init_subscriber(settings: &SerilogSettings) -> Result<()> {
        let directives = filter_directives(settings);
        let filter = EnvFilter::try_new(&directives).map_err(|e| ConfigError::LoggingInitError {
            message: format!("invalid filter '{}': {}", directives, e),
        })?;

        let console = settings
            .console
            .as_ref()
            .filter(|console| console.enabled)
            .map(|console| {
                fmt::layer()
                    .with_target(true)
                    .with_filter(sink_level(console.restricted_to_minimum_level.as_deref()))
            });

        let file = match settings.file.as_ref().filter(|file| file.enabled) {
            Some(sink) => {
                let path = Path::new(&sink.path);
                if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                    fs::create_dir_all(dir)?;
                }
                let handle = OpenOptions::new().create(true).append(true).open(path)?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(handle))
                        .with_filter(sink_level(sink.restricted_to_minimum_level.as_deref())),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file)
            .try_init()
            .map_err(|e| ConfigError::LoggingInitError {
                message: e.to_string(),
            })?;

        tracing::info!(filter = %directives, "Logging initialized");
        Ok(())
    }

}

#[cfg(feature = "subscriber")]
pub use sink::init_subscriber;
