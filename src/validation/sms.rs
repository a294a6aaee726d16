// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global SMS settings checks. Everything here is a warning.

use super::ValidationResult;
use crate::ports::Configuration;

/// Section checked by this validator.
pub const SECTION: &str = "SmsSettings";

/// Checks the Twilio credentials when Twilio is the provider.
pub fn validate(config: &dyn Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();
    let section = config.section(SECTION);
    if !section.exists() {
        result.warn("SmsSettings section not found - SMS functionality may not work");
        return result;
    }

    let provider = section
        .get_non_empty("Provider")
        .map(|p| p.to_lowercase())
        .unwrap_or_else(|| "twilio".to_string());
    if provider != "twilio" {
        return result;
    }

    match section.get_non_empty("TwilioAccountSid") {
        None => result.warn("SmsSettings:TwilioAccountSid is not configured - SMS sending will fail"),
        Some(sid) if !sid.starts_with("AC") => {
            result.warn("SmsSettings:TwilioAccountSid should start with 'AC'")
        }
        Some(_) => {}
    }
    if section.get_non_empty("TwilioAuthToken").is_none() {
        result.warn("SmsSettings:TwilioAuthToken is not configured - SMS sending will fail");
    }
    if section.get_non_empty("TwilioPhoneNumber").is_none() {
        result.warn("SmsSettings:TwilioPhoneNumber is not configured - SMS sending will fail");
    }

    result
}
