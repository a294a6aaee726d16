// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-domain security policy document.
//!
//! Policies are persisted as JSON with camelCase keys. Reading is
//! case-insensitive: incoming object keys are folded onto the canonical
//! spelling before deserializing, and missing fields take their defaults.

use super::PasswordPolicySettings;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Description given to the built-in fallback policy.
pub const DEFAULT_POLICY_DESCRIPTION: &str = "Default security policy";

/// The complete security policy for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityPolicy {
    /// Domain this policy applies to.
    pub domain: String,
    /// Free-form description.
    pub description: String,
    /// Login throttling and device tracking.
    pub login_security: LoginSecuritySettings,
    /// Password rules.
    pub password_policy: PasswordPolicySettings,
    /// Email confirmation requirements.
    pub email_confirmation: EmailConfirmationPolicySettings,
    /// Mobile confirmation requirements.
    pub mobile_confirmation: MobileConfirmationPolicySettings,
    /// Token lifetimes and session limits.
    pub session_management: SessionManagementSettings,
    /// Multi-factor authentication rules.
    pub mfa_policy: MfaPolicySettings,
}

/// Failed login handling and device tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginSecuritySettings {
    /// Failed attempts before the account locks.
    pub max_failed_attempts: i32,
    /// Lockout duration.
    pub lockout_duration_minutes: i32,
    /// Window after which the failure counter resets.
    pub reset_failed_attempts_after_minutes: i32,
    /// Remember devices that have signed in.
    pub enable_device_tracking: bool,
    /// Notify the user about sign-ins from new devices.
    pub notify_on_new_device: bool,
    /// Require MFA when signing in from a new device.
    pub require_mfa_for_new_device: bool,
    /// Refuse new devices that cannot complete MFA.
    pub block_new_device_without_mfa: bool,
}

impl Default for LoginSecuritySettings {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_duration_minutes: 15,
            reset_failed_attempts_after_minutes: 30,
            enable_device_tracking: true,
            notify_on_new_device: true,
            require_mfa_for_new_device: false,
            block_new_device_without_mfa: false,
        }
    }
}

/// Email confirmation requirements and send limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfirmationPolicySettings {
    /// Block sign-in until the address is confirmed.
    pub required: bool,
    /// Confirmation token lifetime.
    pub token_expiration_hours: i32,
    /// Hourly send limit per user.
    pub max_emails_per_hour: i32,
    /// Daily send limit per user.
    pub max_emails_per_day: i32,
}

impl Default for EmailConfirmationPolicySettings {
    fn default() -> Self {
        Self {
            required: false,
            token_expiration_hours: 24,
            max_emails_per_hour: 3,
            max_emails_per_day: 10,
        }
    }
}

/// Mobile confirmation requirements and send limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileConfirmationPolicySettings {
    /// Block sign-in until the number is confirmed.
    pub required: bool,
    /// Code lifetime.
    pub code_expiration_minutes: i32,
    /// Hourly send limit per user.
    pub max_sms_per_hour: i32,
    /// Daily send limit per user.
    pub max_sms_per_day: i32,
    /// Number of digits.
    pub code_length: i32,
}

impl Default for MobileConfirmationPolicySettings {
    fn default() -> Self {
        Self {
            required: false,
            code_expiration_minutes: 10,
            max_sms_per_hour: 3,
            max_sms_per_day: 10,
            code_length: 6,
        }
    }
}

/// Token lifetimes and concurrent session limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionManagementSettings {
    /// Access token lifetime.
    pub access_token_lifetime_minutes: i32,
    /// Refresh token lifetime.
    pub refresh_token_lifetime_days: i32,
    /// Allow more than one active session.
    pub allow_concurrent_sessions: bool,
    /// Session cap; 0 means unlimited.
    pub max_concurrent_sessions: i32,
    /// Issue a new refresh token on every refresh.
    pub rotate_refresh_token: bool,
    /// Revoke sessions when the password changes.
    pub invalidate_sessions_on_password_change: bool,
}

impl Default for SessionManagementSettings {
    fn default() -> Self {
        Self {
            access_token_lifetime_minutes: 15,
            refresh_token_lifetime_days: 7,
            allow_concurrent_sessions: true,
            max_concurrent_sessions: 0,
            rotate_refresh_token: false,
            invalidate_sessions_on_password_change: true,
        }
    }
}

/// Multi-factor authentication rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MfaPolicySettings {
    /// Require MFA for every user.
    pub required: bool,
    /// Methods users may enrol.
    pub allowed_methods: Vec<String>,
    /// Method offered first.
    pub preferred_method: String,
    /// Allow a second method as backup.
    pub allow_backup_method: bool,
    /// Days a new user may defer enrolment.
    pub grace_period_days: i32,
    /// Days a device is remembered after MFA.
    pub remember_device_days: i32,
}

impl Default for MfaPolicySettings {
    fn default() -> Self {
        Self {
            required: false,
            allowed_methods: vec!["totp".to_string(), "sms".to_string(), "email".to_string()],
            preferred_method: "totp".to_string(),
            allow_backup_method: true,
            grace_period_days: 0,
            remember_device_days: 30,
        }
    }
}

impl SecurityPolicy {
    /// The built-in policy used when no file is available for `domain`.
    pub fn default_for(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            description: DEFAULT_POLICY_DESCRIPTION.to_string(),
            ..Self::default()
        }
    }

    /// Serializes the policy as indented camelCase JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a policy, matching property names case-insensitively.
    ///
    /// `null` properties are treated as missing.
    ///
    /// ```
    /// use domaincfg::domain::settings::SecurityPolicy;
    ///
    /// let policy = SecurityPolicy::from_json_str(
    ///     r#"{ "Description": "Strict", "LoginSecurity": { "MAXFAILEDATTEMPTS": 3 } }"#,
    /// ).unwrap();
    /// assert_eq!(policy.description, "Strict");
    /// assert_eq!(policy.login_security.max_failed_attempts, 3);
    /// assert_eq!(policy.login_security.lockout_duration_minutes, 15);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let input: Value = serde_json::from_str(json)?;
        let template = serde_json::to_value(Self::default())?;
        Ok(serde_json::from_value(fold_keys(input, &template))?)
    }
}

/// Renames object keys in `value` to the spelling used in `template`,
/// ignoring ASCII case, and drops `null` members.
fn fold_keys(value: Value, template: &Value) -> Value {
    match (value, template) {
        (Value::Object(input), Value::Object(canonical)) => {
            let mut folded = Map::with_capacity(input.len());
            for (key, child) in input {
                if child.is_null() {
                    continue;
                }
                match canonical
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&key))
                {
                    Some((name, nested)) => {
                        folded.insert(name.clone(), fold_keys(child, nested));
                    }
                    None => {
                        folded.insert(key, child);
                    }
                }
            }
            Value::Object(folded)
        }
        (value, _) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_for_sets_domain_and_description() {
        let policy = SecurityPolicy::default_for("acme");
        assert_eq!(policy.domain, "acme");
        assert_eq!(policy.description, DEFAULT_POLICY_DESCRIPTION);
        assert_eq!(policy.login_security.max_failed_attempts, 5);
        assert_eq!(policy.login_security.lockout_duration_minutes, 15);
        assert_eq!(policy.mfa_policy.allowed_methods, vec!["totp", "sms", "email"]);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = SecurityPolicy::default_for("acme").to_json_pretty().unwrap();
        assert!(json.contains("\"loginSecurity\""));
        assert!(json.contains("\"maxFailedAttempts\": 5"));
        assert!(json.contains("\"invalidateSessionsOnPasswordChange\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_json_read_ignores_case_and_unknown_fields() {
        let policy = SecurityPolicy::from_json_str(
            r#"{
                "DOMAIN": "ignored-later",
                "mfapolicy": { "Required": true, "AllowedMethods": ["totp"] },
                "SessionManagement": { "MaxConcurrentSessions": 2 },
                "somethingElse": 1
            }"#,
        )
        .unwrap();

        assert_eq!(policy.domain, "ignored-later");
        assert!(policy.mfa_policy.required);
        assert_eq!(policy.mfa_policy.allowed_methods, vec!["totp"]);
        assert_eq!(policy.mfa_policy.preferred_method, "totp");
        assert_eq!(policy.session_management.max_concurrent_sessions, 2);
    }

    #[test]
    fn test_json_null_members_keep_defaults() {
        let policy =
            SecurityPolicy::from_json_str(r#"{ "passwordPolicy": null, "description": null }"#)
                .unwrap();
        assert_eq!(policy.password_policy, PasswordPolicySettings::default());
        assert!(policy.description.is_empty());
    }

    #[test]
    fn test_json_malformed_is_error() {
        assert!(SecurityPolicy::from_json_str("{ not json").is_err());
        assert!(SecurityPolicy::from_json_str(r#"{ "loginSecurity": { "maxFailedAttempts": "five" } }"#).is_err());
    }
}
