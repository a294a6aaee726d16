// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password policy and password reset settings.

use crate::domain::binding::{BindSettings, DomainSettings};
use crate::domain::ConfigSection;
use serde::{Deserialize, Serialize};

/// Password complexity and rotation rules.
///
/// The same record is embedded in [`SecurityPolicy`](super::SecurityPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicySettings {
    /// Reject passwords found in the user's history.
    pub prevent_password_reuse: bool,
    /// Number of previous passwords remembered.
    pub password_history_limit: i32,
    /// Minimum length.
    pub minimum_length: i32,
    /// Maximum length.
    pub maximum_length: i32,
    /// Require at least one uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one lowercase letter.
    pub require_lowercase: bool,
    /// Require at least one digit.
    pub require_digit: bool,
    /// Require at least one of `special_characters`.
    pub require_special_character: bool,
    /// Characters counted as special.
    pub special_characters: String,
    /// Days until a password expires (0 disables expiry).
    pub password_expiration_days: i32,
    /// Days before expiry to start warning.
    pub password_expiration_warning_days: i32,
}

impl Default for PasswordPolicySettings {
    fn default() -> Self {
        Self {
            prevent_password_reuse: true,
            password_history_limit: 5,
            minimum_length: 8,
            maximum_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special_character: true,
            special_characters: "!@#$%^&*()_+-=[]{}|;:,.<>?".to_string(),
            password_expiration_days: 90,
            password_expiration_warning_days: 14,
        }
    }
}

impl BindSettings for PasswordPolicySettings {
    const NAME: &'static str = "PasswordPolicySettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_bool("PreventPasswordReuse", &mut self.prevent_password_reuse);
        section.bind_parsed("PasswordHistoryLimit", &mut self.password_history_limit);
        section.bind_parsed("MinimumLength", &mut self.minimum_length);
        section.bind_parsed("MaximumLength", &mut self.maximum_length);
        section.bind_bool("RequireUppercase", &mut self.require_uppercase);
        section.bind_bool("RequireLowercase", &mut self.require_lowercase);
        section.bind_bool("RequireDigit", &mut self.require_digit);
        section.bind_bool("RequireSpecialCharacter", &mut self.require_special_character);
        section.bind_string("SpecialCharacters", &mut self.special_characters);
        section.bind_parsed("PasswordExpirationDays", &mut self.password_expiration_days);
        section.bind_parsed(
            "PasswordExpirationWarningDays",
            &mut self.password_expiration_warning_days,
        );
    }
}

impl DomainSettings for PasswordPolicySettings {
    const GLOBAL_SECTION: &'static str = "PasswordPolicy";
    const DOMAIN_SECTION: &'static str = "DomainPasswordPolicy";
}

/// Password reset link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordResetSettings {
    /// Lifetime of a reset token.
    pub expiration_minutes: i32,
    /// Base URL of the reset page.
    pub reset_link_url: String,
}

impl Default for PasswordResetSettings {
    fn default() -> Self {
        Self {
            expiration_minutes: 60,
            reset_link_url: String::new(),
        }
    }
}

impl BindSettings for PasswordResetSettings {
    const NAME: &'static str = "PasswordResetSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_parsed("ExpirationMinutes", &mut self.expiration_minutes);
        section.bind_string("ResetLinkUrl", &mut self.reset_link_url);
    }
}

impl DomainSettings for PasswordResetSettings {
    const GLOBAL_SECTION: &'static str = "PasswordResetSettings";
    const DOMAIN_SECTION: &'static str = "DomainPasswordResetSettings";
}
