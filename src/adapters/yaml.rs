// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration source.

use super::file::{join_path, FileConfigAdapter};
use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// YAML parser producing `:`-delimited key paths.
///
/// # Examples
///
/// ```rust
/// use domaincfg::adapters::YamlParser;
/// use domaincfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml = "DomainConnectionStrings:\n  acme: Server=db1\n  globex: Server=db2";
/// let result = parser.parse(yaml).unwrap();
/// assert_eq!(
///     result.get("DomainConnectionStrings:acme"),
///     Some(&"Server=db1".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn key_segment(key: &Value) -> Option<String> {
        match key {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn flatten_yaml(value: &Value, prefix: &str, result: &mut BTreeMap<String, String>) {
        match value {
            Value::Mapping(map) if map.is_empty() => {
                if !prefix.is_empty() {
                    result.insert(prefix.to_string(), String::new());
                }
            }
            Value::Mapping(map) => {
                for (key, val) in map {
                    if let Some(segment) = Self::key_segment(key) {
                        Self::flatten_yaml(val, &join_path(prefix, &segment), result);
                    }
                }
            }
            Value::Sequence(seq) if seq.is_empty() => {
                if !prefix.is_empty() {
                    result.insert(prefix.to_string(), String::new());
                }
            }
            Value::Sequence(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten_yaml(val, &join_path(prefix, &i.to_string()), result);
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
            Value::Tagged(tagged) => Self::flatten_yaml(&tagged.value, prefix, result),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        let mut result = BTreeMap::new();
        Self::flatten_yaml(&value, "", &mut result);
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn source_name(&self) -> &str {
        "yaml-file"
    }
}

/// Configuration source for YAML files.
pub type YamlFileAdapter = FileConfigAdapter<YamlParser>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigKey;
    use crate::ports::ConfigSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_parser_nested() {
        let parser = YamlParser::new();
        let yaml = r#"
DomainEmailSettings:
  acme:
    SmtpServer: smtp.acme.test
    SmtpPort: 2525
    EnableSsl: false
"#;
        let result = parser.parse(yaml).unwrap();

        assert_eq!(
            result.get("DomainEmailSettings:acme:SmtpServer"),
            Some(&"smtp.acme.test".to_string())
        );
        assert_eq!(
            result.get("DomainEmailSettings:acme:SmtpPort"),
            Some(&"2525".to_string())
        );
        assert_eq!(
            result.get("DomainEmailSettings:acme:EnableSsl"),
            Some(&"false".to_string())
        );
    }

    #[test]
    fn test_yaml_parser_sequences() {
        let parser = YamlParser::new();
        let yaml = r#"
Serilog:
  Enrich:
    - FromLogContext
    - WithMachineName
  WriteTo:
    - Name: Console
"#;
        let result = parser.parse(yaml).unwrap();

        assert_eq!(result.get("Serilog:Enrich:0"), Some(&"FromLogContext".to_string()));
        assert_eq!(result.get("Serilog:Enrich:1"), Some(&"WithMachineName".to_string()));
        assert_eq!(result.get("Serilog:WriteTo:0:Name"), Some(&"Console".to_string()));
    }

    #[test]
    fn test_yaml_parser_null_and_empty() {
        let parser = YamlParser::new();
        let yaml = "JwtSettings:\n  RsaPrivateKeyPem: null\nDomainJwtSettings:\n  acme: {}\n";
        let result = parser.parse(yaml).unwrap();

        assert_eq!(result.get("JwtSettings:RsaPrivateKeyPem"), Some(&String::new()));
        assert_eq!(result.get("DomainJwtSettings:acme"), Some(&String::new()));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlParser::new();
        assert!(parser.parse("invalid: yaml: content:").is_err());
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::new();
        let extensions = parser.supported_extensions().to_vec();
        assert_eq!(extensions, vec!["yaml", "yml"]);
    }

    #[test]
    fn test_yaml_adapter_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "SmsSettings:\n  Provider: Twilio").unwrap();

        let adapter = YamlFileAdapter::from_file(temp_file.path()).unwrap();

        assert_eq!(adapter.name(), "yaml-file");
        let value = adapter.get(&ConfigKey::from("SmsSettings:Provider")).unwrap();
        assert_eq!(value.unwrap().as_str(), "Twilio");
        assert!(adapter.get_str("SmsSettings:TwilioAuthToken").unwrap().is_none());
    }
}
