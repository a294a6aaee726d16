// SPDX-License-Identifier: MIT OR Apache-2.0

//! JWT signing and lifetime settings.

use crate::domain::binding::{BindSettings, DomainSettings};
use crate::domain::ConfigSection;
use serde::{Deserialize, Serialize};

/// Token signing and lifetime settings.
///
/// `key_type` is either `"hmac"` (uses `secret_key`) or `"rsa"` (uses the
/// private key path or inline PEM).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JwtSettings {
    /// `"hmac"` or `"rsa"`.
    pub key_type: String,
    /// HMAC signing secret.
    pub secret_key: String,
    /// Path to an RSA private key file.
    pub rsa_private_key_path: Option<String>,
    /// Inline RSA private key.
    pub rsa_private_key_pem: Option<String>,
    /// Token issuer.
    pub issuer: String,
    /// Token audience.
    pub audience: String,
    /// Access token lifetime.
    pub access_token_expiration_minutes: i32,
    /// Refresh token lifetime.
    pub refresh_token_expiration_days: i32,
    /// Lifetime of anonymous tokens.
    pub anonymous_token_expiration_minutes: i32,
    /// Issue a new refresh token on every refresh.
    pub rotate_refresh_token: bool,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            key_type: "hmac".to_string(),
            secret_key: String::new(),
            rsa_private_key_path: None,
            rsa_private_key_pem: None,
            issuer: "AuthenticationApi".to_string(),
            audience: "AuthenticationApiClient".to_string(),
            access_token_expiration_minutes: 15,
            refresh_token_expiration_days: 7,
            anonymous_token_expiration_minutes: 10,
            rotate_refresh_token: false,
        }
    }
}

impl BindSettings for JwtSettings {
    const NAME: &'static str = "JwtSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_string("KeyType", &mut self.key_type);
        section.bind_string("SecretKey", &mut self.secret_key);
        section.bind_opt_string("RsaPrivateKeyPath", &mut self.rsa_private_key_path);
        section.bind_opt_string("RsaPrivateKeyPem", &mut self.rsa_private_key_pem);
        section.bind_string("Issuer", &mut self.issuer);
        section.bind_string("Audience", &mut self.audience);
        section.bind_parsed(
            "AccessTokenExpirationMinutes",
            &mut self.access_token_expiration_minutes,
        );
        section.bind_parsed(
            "RefreshTokenExpirationDays",
            &mut self.refresh_token_expiration_days,
        );
        section.bind_parsed(
            "AnonymousTokenExpirationMinutes",
            &mut self.anonymous_token_expiration_minutes,
        );
        section.bind_bool("RotateRefreshToken", &mut self.rotate_refresh_token);
    }
}

impl DomainSettings for JwtSettings {
    const GLOBAL_SECTION: &'static str = "JwtSettings";
    const DOMAIN_SECTION: &'static str = "DomainJwtSettings";
}
