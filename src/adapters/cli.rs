// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::BTreeMap;

/// Configuration source adapter for command-line arguments.
///
/// Keys are full configuration paths. Supported forms:
/// - `--Section:Key=value` and `--Section:Key value`
/// - `/Section:Key=value` and `/Section:Key value`
/// - `Section:Key=value`
///
/// Anything else is ignored. When a key repeats, the last value wins.
///
/// # Priority
///
/// Command-line arguments have the highest priority (3).
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::CommandLineAdapter;
/// use domaincfg::ports::ConfigSource;
///
/// let args = vec!["--JwtSettings:KeyType=rsa", "/DomainConfiguration:EnableCaching", "false"];
/// let adapter = CommandLineAdapter::from_args(args);
/// assert_eq!(adapter.get_str("JwtSettings:KeyType").unwrap().unwrap().as_str(), "rsa");
/// assert_eq!(
///     adapter.get_str("DomainConfiguration:EnableCaching").unwrap().unwrap().as_str(),
///     "false"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    values: BTreeMap<String, String>,
}

impl CommandLineAdapter {
    /// Creates an adapter with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter from a list of arguments.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        adapter
    }

    /// Creates an adapter from the process arguments, skipping the program
    /// name.
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            i += 1;

            let (flagged, body) = match arg.strip_prefix("--").or_else(|| arg.strip_prefix('/')) {
                Some(body) => (true, body),
                None => (false, arg),
            };

            if let Some((key, value)) = body.split_once('=') {
                if !key.is_empty() {
                    self.values.insert(key.to_string(), value.to_string());
                }
                continue;
            }

            if !flagged || body.is_empty() {
                tracing::debug!(argument = arg, "Ignoring command-line argument");
                continue;
            }

            match args.get(i).map(|next| next.as_ref()) {
                Some(next) if !next.starts_with("--") => {
                    self.values.insert(body.to_string(), next.to_string());
                    i += 1;
                }
                _ => {
                    tracing::debug!(argument = arg, "Command-line switch has no value");
                }
            }
        }
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        3
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
        // Arguments don't change during runtime
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(adapter: &CommandLineAdapter, key: &str) -> Option<String> {
        adapter.get_str(key).unwrap().map(String::from)
    }

    #[test]
    fn test_cli_adapter_metadata() {
        let adapter = CommandLineAdapter::default();
        assert_eq!(adapter.name(), "cli");
        assert_eq!(adapter.priority(), 3);
        assert!(adapter.all_keys().unwrap().is_empty());
    }

    #[test]
    fn test_cli_adapter_all_forms() {
        let adapter = CommandLineAdapter::from_args(vec![
            "--EmailSettings:SmtpServer=smtp.test",
            "--EmailSettings:SmtpPort",
            "2525",
            "/SmsSettings:Provider=Twilio",
            "/SmsSettings:TwilioPhoneNumber",
            "+1555",
            "OtpSettings:CodeLength=8",
        ]);

        assert_eq!(value(&adapter, "EmailSettings:SmtpServer").as_deref(), Some("smtp.test"));
        assert_eq!(value(&adapter, "EmailSettings:SmtpPort").as_deref(), Some("2525"));
        assert_eq!(value(&adapter, "SmsSettings:Provider").as_deref(), Some("Twilio"));
        assert_eq!(value(&adapter, "SmsSettings:TwilioPhoneNumber").as_deref(), Some("+1555"));
        assert_eq!(value(&adapter, "OtpSettings:CodeLength").as_deref(), Some("8"));
    }

    #[test]
    fn test_cli_adapter_switch_followed_by_switch() {
        let adapter = CommandLineAdapter::from_args(vec!["--A", "--B", "1"]);
        assert!(value(&adapter, "A").is_none());
        assert_eq!(value(&adapter, "B").as_deref(), Some("1"));
    }

    #[test]
    fn test_cli_adapter_path_value_after_switch() {
        let adapter = CommandLineAdapter::from_args(vec!["--Serilog:WriteTo:0:Args:path", "/var/log/app.log"]);
        assert_eq!(
            value(&adapter, "Serilog:WriteTo:0:Args:path").as_deref(),
            Some("/var/log/app.log")
        );
    }

    #[test]
    fn test_cli_adapter_equals_in_value() {
        let adapter =
            CommandLineAdapter::from_args(vec!["--DomainConnectionStrings:acme=Server=db;Port=5432"]);
        assert_eq!(
            value(&adapter, "DomainConnectionStrings:acme").as_deref(),
            Some("Server=db;Port=5432")
        );
    }

    #[test]
    fn test_cli_adapter_ignores_positionals_and_keeps_last() {
        let adapter =
            CommandLineAdapter::from_args(vec!["serve", "--Key=1", "positional", "--Key=2", "--Empty="]);
        let keys = adapter.all_keys().unwrap();
        assert_eq!(keys, vec![ConfigKey::from("Empty"), ConfigKey::from("Key")]);
        assert_eq!(value(&adapter, "Key").as_deref(), Some("2"));
        assert_eq!(value(&adapter, "Empty").as_deref(), Some(""));
    }

    #[test]
    fn test_cli_adapter_reload_is_noop() {
        let mut adapter = CommandLineAdapter::from_args(vec!["--Key=1"]);
        assert!(adapter.reload().is_ok());
        assert_eq!(value(&adapter, "Key").as_deref(), Some("1"));
    }
}
