// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection string checks.

use super::ValidationResult;
use crate::ports::Configuration;

/// Section checked by this validator.
pub const SECTION: &str = "DomainConnectionStrings";

/// Requires at least one domain and a non-empty connection string for each.
pub fn validate(config: &dyn Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();
    let section = config.section(SECTION);
    if !section.exists() {
        result.error("DomainConnectionStrings section is required for database connectivity");
        return result;
    }

    let domains = section.children();
    if domains.is_empty() {
        result.error("DomainConnectionStrings has no domains configured");
        return result;
    }

    for domain in domains {
        let empty = domain.value().map_or(true, |value| value.is_empty());
        if empty {
            result.error(format!(
                "DomainConnectionStrings:{} has no connection string",
                domain.key()
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryConfigSource;
    use crate::service::ConfigurationRoot;

    fn run(pairs: &[(&str, &str)]) -> ValidationResult {
        let root = ConfigurationRoot::from_source(MemoryConfigSource::from_pairs(pairs.iter().copied()));
        validate(&root)
    }

    #[test]
    fn test_missing_section() {
        assert_eq!(
            run(&[]).errors,
            vec!["DomainConnectionStrings section is required for database connectivity"]
        );
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(
            run(&[("DomainConnectionStrings", "")]).errors,
            vec!["DomainConnectionStrings has no domains configured"]
        );
    }

    #[test]
    fn test_each_domain_needs_a_value() {
        let result = run(&[
            ("DomainConnectionStrings:acme", "Host=db"),
            ("DomainConnectionStrings:globex", ""),
            ("DomainConnectionStrings:initech:Primary", "Host=db2"),
        ]);
        assert_eq!(
            result.errors,
            vec![
                "DomainConnectionStrings:globex has no connection string",
                "DomainConnectionStrings:initech has no connection string",
            ]
        );
    }

    #[test]
    fn test_valid() {
        assert!(run(&[("DomainConnectionStrings:acme", "Host=db")]).is_valid());
    }
}
