// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain option records bound from a single section.
//!
//! These have no per-domain layering; the bundle binds each one once from
//! its fixed section.

use crate::domain::binding::{BindSettings, OptionsSection};
use crate::domain::ConfigSection;
use serde::{Deserialize, Serialize};

/// One-time password generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtpSettings {
    /// Code lifetime.
    pub expiration_minutes: i32,
    /// Number of digits.
    pub code_length: i32,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            expiration_minutes: 10,
            code_length: 6,
        }
    }
}

impl BindSettings for OtpSettings {
    const NAME: &'static str = "OtpSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_parsed("ExpirationMinutes", &mut self.expiration_minutes);
        section.bind_parsed("CodeLength", &mut self.code_length);
    }
}

impl OptionsSection for OtpSettings {
    const SECTION: &'static str = "OtpSettings";
}

/// Switches for the mock email and SMS senders used in development.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MockServiceSettings {
    /// Route outgoing messages to the mocks.
    pub enabled: bool,
    /// Echo mock messages to the console.
    pub log_to_console: bool,
    /// Append mock messages to the log files below.
    pub log_to_file: bool,
    /// Mock email log file.
    pub mock_email_log_path: String,
    /// Mock SMS log file.
    pub mock_sms_log_path: String,
}

impl Default for MockServiceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            log_to_console: true,
            log_to_file: true,
            mock_email_log_path: "Logs/mock-emails.log".to_string(),
            mock_sms_log_path: "Logs/mock-sms.log".to_string(),
        }
    }
}

impl BindSettings for MockServiceSettings {
    const NAME: &'static str = "MockServiceSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_bool("Enabled", &mut self.enabled);
        section.bind_bool("LogToConsole", &mut self.log_to_console);
        section.bind_bool("LogToFile", &mut self.log_to_file);
        section.bind_string("MockEmailLogPath", &mut self.mock_email_log_path);
        section.bind_string("MockSmsLogPath", &mut self.mock_sms_log_path);
    }
}

impl OptionsSection for MockServiceSettings {
    const SECTION: &'static str = "MockServices";
}

/// Email address confirmation link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfirmationSettings {
    /// Link lifetime.
    pub expiration_hours: i32,
    /// Base URL of the confirmation page.
    pub confirmation_link_url: String,
}

impl Default for EmailConfirmationSettings {
    fn default() -> Self {
        Self {
            expiration_hours: 24,
            confirmation_link_url: String::new(),
        }
    }
}

impl BindSettings for EmailConfirmationSettings {
    const NAME: &'static str = "EmailConfirmationSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_parsed("ExpirationHours", &mut self.expiration_hours);
        section.bind_string("ConfirmationLinkUrl", &mut self.confirmation_link_url);
    }
}

impl OptionsSection for EmailConfirmationSettings {
    const SECTION: &'static str = "EmailConfirmationSettings";
}

/// Mobile number confirmation code settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileConfirmationSettings {
    /// Code lifetime.
    pub expiration_minutes: i32,
    /// Number of digits.
    pub code_length: i32,
}

impl Default for MobileConfirmationSettings {
    fn default() -> Self {
        Self {
            expiration_minutes: 10,
            code_length: 6,
        }
    }
}

impl BindSettings for MobileConfirmationSettings {
    const NAME: &'static str = "MobileConfirmationSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_parsed("ExpirationMinutes", &mut self.expiration_minutes);
        section.bind_parsed("CodeLength", &mut self.code_length);
    }
}

impl OptionsSection for MobileConfirmationSettings {
    const SECTION: &'static str = "MobileConfirmationSettings";
}

/// Database access settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Provider name.
    pub provider: String,
    /// Fallback connection string.
    pub connection_string: String,
    /// Command timeout in seconds.
    pub command_timeout: i32,
    /// Enable connection pooling.
    pub enable_pooling: bool,
    /// Minimum pool size.
    pub min_pool_size: i32,
    /// Maximum pool size.
    pub max_pool_size: i32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            provider: "ODBC".to_string(),
            connection_string: String::new(),
            command_timeout: 30,
            enable_pooling: true,
            min_pool_size: 0,
            max_pool_size: 100,
        }
    }
}

impl BindSettings for DatabaseSettings {
    const NAME: &'static str = "DatabaseSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_string("Provider", &mut self.provider);
        section.bind_string("ConnectionString", &mut self.connection_string);
        section.bind_parsed("CommandTimeout", &mut self.command_timeout);
        section.bind_bool("EnablePooling", &mut self.enable_pooling);
        section.bind_parsed("MinPoolSize", &mut self.min_pool_size);
        section.bind_parsed("MaxPoolSize", &mut self.max_pool_size);
    }
}

impl OptionsSection for DatabaseSettings {
    const SECTION: &'static str = "DatabaseSettings";
}
