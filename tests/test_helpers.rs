// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test helpers and utilities for integration tests.

use domaincfg::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use domaincfg::ports::ConfigSource;
use std::collections::HashMap;

/// A mock configuration source for testing purposes.
///
/// Values are held in a plain map keyed by full `:`-delimited paths.
#[derive(Debug, Clone)]
pub struct MockConfigSource {
    name: String,
    priority: u8,
    values: HashMap<String, String>,
    should_fail_reload: bool,
}

impl MockConfigSource {
    /// Creates a new mock source with the given name and priority.
    pub fn new(name: &str, priority: u8) -> Self {
        Self {
            name: name.to_string(),
            priority,
            values: HashMap::new(),
            should_fail_reload: false,
        }
    }

    /// Adds a key-value pair to the mock source.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds multiple key-value pairs to the mock source.
    pub fn with_values(mut self, values: HashMap<String, String>) -> Self {
        self.values.extend(values);
        self
    }

    /// Configures the source to fail on reload.
    pub fn with_failing_reload(mut self, should_fail: bool) -> Self {
        self.should_fail_reload = should_fail;
        self
    }

    /// Updates a value in the mock source.
    pub fn update_value(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Removes a value from the mock source.
    pub fn remove_value(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl ConfigSource for MockConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
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
        if self.should_fail_reload {
            Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: "Mock reload failure".to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

/// Creates a temporary JSON file with the given content.
///
/// Returns a NamedTempFile that will be automatically deleted when dropped.
pub fn create_temp_json(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Creates a mock source shaped like a typical multi-domain deployment.
pub fn create_test_source() -> MockConfigSource {
    MockConfigSource::new("test", 1)
        .with_value("EmailSettings:SmtpServer", "smtp.example.test")
        .with_value("EmailSettings:SmtpPort", "587")
        .with_value("DomainEmailSettings:acme:SmtpServer", "smtp.acme.test")
        .with_value("DomainConnectionStrings:acme", "Host=acme-db")
}

/// Creates multiple mock sources with different priorities for precedence testing.
pub fn create_precedence_sources() -> (MockConfigSource, MockConfigSource, MockConfigSource) {
    let low = MockConfigSource::new("low_priority", 1)
        .with_value("JwtSettings:Issuer", "from_low")
        .with_value("JwtSettings:Audience", "low_value");

    let medium = MockConfigSource::new("medium_priority", 2)
        .with_value("JwtSettings:Issuer", "from_medium")
        .with_value("JwtSettings:KeyType", "rsa");

    let high = MockConfigSource::new("high_priority", 3)
        .with_value("JwtSettings:Issuer", "from_high")
        .with_value("JwtSettings:RsaPrivateKeyPath", "keys/signing.pem");

    (low, medium, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domaincfg::adapters::JsonFileAdapter;
    use domaincfg::domain::DomainConfigurationProvider;
    use domaincfg::domain::settings::JwtSettings;
    use domaincfg::providers::DomainConfigResolver;
    use domaincfg::service::ConfigurationRoot;
    use std::sync::Arc;

    #[test]
    fn test_mock_source_basic() {
        let source = MockConfigSource::new("test", 1).with_value("JwtSettings:Issuer", "auth");

        assert_eq!(source.name(), "test");
        assert_eq!(source.priority(), 1);

        let value = source
            .get(&ConfigKey::from("JwtSettings:Issuer"))
            .unwrap()
            .unwrap();
        assert_eq!(value.as_str(), "auth");
    }

    #[test]
    fn test_mock_source_all_keys() {
        let source = MockConfigSource::new("test", 1).with_values(HashMap::from([
            ("a:b".to_string(), "1".to_string()),
            ("a:c".to_string(), "2".to_string()),
        ]));

        let keys = source.all_keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&ConfigKey::from("a:b")));
        assert!(keys.contains(&ConfigKey::from("a:c")));
    }

    #[test]
    fn test_mock_source_update_and_remove() {
        let mut source = MockConfigSource::new("test", 1).with_value("key", "original");

        source.update_value("key", "updated");
        let value = source.get(&ConfigKey::from("key")).unwrap().unwrap();
        assert_eq!(value.as_str(), "updated");

        source.remove_value("key");
        assert!(source.get(&ConfigKey::from("key")).unwrap().is_none());
    }

    #[test]
    fn test_mock_source_reload_failure() {
        let mut source = MockConfigSource::new("test", 1).with_failing_reload(true);

        let result = source.reload();
        assert!(result.is_err());
    }

    #[test]
    fn test_create_test_source() {
        let source = create_test_source();
        assert_eq!(source.name(), "test");

        let value = source
            .get_str("DomainEmailSettings:acme:SmtpServer")
            .unwrap()
            .unwrap();
        assert_eq!(value.as_str(), "smtp.acme.test");
    }

    #[test]
    fn test_precedence_sources_merge_by_priority() {
        let (low, medium, high) = create_precedence_sources();

        let root = ConfigurationRoot::builder()
            .with_source(Box::new(medium))
            .with_source(Box::new(high))
            .with_source(Box::new(low))
            .build()
            .unwrap();
        let resolver = DomainConfigResolver::<JwtSettings>::for_settings(Arc::new(root), None);

        let jwt = resolver.global_settings();
        assert_eq!(jwt.issuer, "from_high");
        assert_eq!(jwt.audience, "low_value");
        assert_eq!(jwt.key_type, "rsa");
        assert_eq!(jwt.rsa_private_key_path.as_deref(), Some("keys/signing.pem"));
    }

    #[test]
    fn test_create_temp_json() {
        let file = create_temp_json(r#"{ "JwtSettings": { "Issuer": "json" } }"#);
        let adapter = JsonFileAdapter::from_file(file.path()).unwrap();

        let value = adapter.get_str("JwtSettings:Issuer").unwrap().unwrap();
        assert_eq!(value.as_str(), "json");
    }
}
