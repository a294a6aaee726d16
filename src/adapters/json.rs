// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file configuration source.

use super::file::{join_path, FileConfigAdapter};
use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON parser producing `:`-delimited key paths.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::JsonParser;
/// use domaincfg::ports::ConfigParser;
///
/// let parsed = JsonParser::new()
///     .parse(r#"{ "Serilog": { "Using": ["Console", "File"] } }"#)
///     .unwrap();
/// assert_eq!(parsed.get("Serilog:Using:1"), Some(&"File".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    fn flatten(value: &Value, prefix: &str, result: &mut BTreeMap<String, String>) {
        match value {
            Value::Object(map) if map.is_empty() => {
                if !prefix.is_empty() {
                    result.insert(prefix.to_string(), String::new());
                }
            }
            Value::Object(map) => {
                for (key, val) in map {
                    Self::flatten(val, &join_path(prefix, key), result);
                }
            }
            Value::Array(items) if items.is_empty() => {
                if !prefix.is_empty() {
                    result.insert(prefix.to_string(), String::new());
                }
            }
            Value::Array(items) => {
                for (i, val) in items.iter().enumerate() {
                    Self::flatten(val, &join_path(prefix, &i.to_string()), result);
                }
            }
            Value::String(s) => {
                result.insert(prefix.to_string(), s.clone());
            }
            Value::Number(n) => {
                result.insert(prefix.to_string(), n.to_string());
            }
            Value::Bool(b) => {
                result.insert(prefix.to_string(), b.to_string());
            }
            Value::Null => {
                result.insert(prefix.to_string(), String::new());
            }
        }
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })?;

        let mut result = BTreeMap::new();
        Self::flatten(&value, "", &mut result);
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn source_name(&self) -> &str {
        "json-file"
    }
}

/// Configuration source for JSON files such as `appsettings.json`.
pub type JsonFileAdapter = FileConfigAdapter<JsonParser>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parser_nested_and_arrays() {
        let parsed = JsonParser::new()
            .parse(
                r#"{
                    "Serilog": {
                        "MinimumLevel": { "Default": "Debug", "Override": { "System": "Warning" } },
                        "WriteTo": [ { "Name": "Console" }, { "Name": "File", "Args": { "path": "x.log" } } ]
                    },
                    "EmailSettings": { "SmtpPort": 25, "EnableSsl": false, "CompanyName": null }
                }"#,
            )
            .unwrap();

        assert_eq!(parsed["Serilog:MinimumLevel:Default"], "Debug");
        assert_eq!(parsed["Serilog:MinimumLevel:Override:System"], "Warning");
        assert_eq!(parsed["Serilog:WriteTo:0:Name"], "Console");
        assert_eq!(parsed["Serilog:WriteTo:1:Args:path"], "x.log");
        assert_eq!(parsed["EmailSettings:SmtpPort"], "25");
        assert_eq!(parsed["EmailSettings:EnableSsl"], "false");
        assert_eq!(parsed["EmailSettings:CompanyName"], "");
    }

    #[test]
    fn test_json_parser_empty_containers_keep_the_key() {
        let parsed = JsonParser::new()
            .parse(r#"{ "DomainSmsSettings": { "acme": {} }, "Serilog": { "Enrich": [] } }"#)
            .unwrap();
        assert_eq!(parsed["DomainSmsSettings:acme"], "");
        assert_eq!(parsed["Serilog:Enrich"], "");
    }

    #[test]
    fn test_json_parser_invalid() {
        let result = JsonParser::new().parse("{ \"a\": ");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_json_parser_metadata() {
        assert_eq!(JsonParser::new().supported_extensions(), &["json"]);
        assert_eq!(JsonParser::new().source_name(), "json-file");
    }
}
