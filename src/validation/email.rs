// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global email settings checks.

use super::ValidationResult;
use crate::ports::Configuration;

/// Section checked by this validator.
pub const SECTION: &str = "EmailSettings";

/// Checks the SMTP server, sender address and port.
pub fn validate(config: &dyn Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();
    let section = config.section(SECTION);
    if !section.exists() {
        result.warn("EmailSettings section not found - email functionality may not work");
        return result;
    }

    if section.get_non_empty("SmtpServer").is_none() {
        result.error("EmailSettings:SmtpServer is required");
    }

    match section.get_non_empty("SenderEmail") {
        None => result.error("EmailSettings:SenderEmail is required"),
        Some(sender) if !looks_like_email(&sender) => result.error(format!(
            "EmailSettings:SenderEmail '{}' is not a valid email address",
            sender
        )),
        Some(_) => {}
    }

    if let Some(port) = section.get_non_empty("SmtpPort") {
        if port.trim().parse::<i32>().is_err() {
            result.error(format!(
                "EmailSettings:SmtpPort '{}' is not a valid port number",
                port
            ));
        }
    }

    result
}

fn looks_like_email(address: &str) -> bool {
    address.contains('@') && address.contains('.')
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
    fn test_missing_section_is_a_warning() {
        let result = run(&[]);
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            vec!["EmailSettings section not found - email functionality may not work"]
        );
    }

    #[test]
    fn test_valid_settings() {
        let result = run(&[
            ("EmailSettings:SmtpServer", "smtp.test"),
            ("EmailSettings:SenderEmail", "noreply@acme.test"),
            ("EmailSettings:SmtpPort", "587"),
        ]);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let result = run(&[("EmailSettings:SenderName", "Acme")]);
        assert_eq!(
            result.errors,
            vec![
                "EmailSettings:SmtpServer is required",
                "EmailSettings:SenderEmail is required",
            ]
        );
    }

    #[test]
    fn test_bad_sender_and_port() {
        let result = run(&[
            ("EmailSettings:SmtpServer", "smtp.test"),
            ("EmailSettings:SenderEmail", "noreply"),
            ("EmailSettings:SmtpPort", "smtp"),
        ]);
        assert_eq!(
            result.errors,
            vec![
                "EmailSettings:SenderEmail 'noreply' is not a valid email address",
                "EmailSettings:SmtpPort 'smtp' is not a valid port number",
            ]
        );
    }
}
