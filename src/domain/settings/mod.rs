// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed settings records.
//!
//! Each record has documented field defaults and an explicit binder. The
//! domain-layered records implement [`DomainSettings`](crate::domain::DomainSettings);
//! the plain ones implement [`OptionsSection`](crate::domain::OptionsSection).

pub mod email;
pub mod jwt;
pub mod logging;
pub mod options;
pub mod password;
pub mod security_policy;
pub mod sms;

pub use email::EmailSettings;
pub use jwt::JwtSettings;
pub use logging::{
    ConsoleSinkSettings, FileSinkSettings, LogLevel, LoggingSettings, MinimumLevelSettings,
    SerilogSettings, StandardLoggingSettings,
};
pub use options::{
    DatabaseSettings, EmailConfirmationSettings, MobileConfirmationSettings, MockServiceSettings,
    OtpSettings,
};
pub use password::{PasswordPolicySettings, PasswordResetSettings};
pub use security_policy::{
    EmailConfirmationPolicySettings, LoginSecuritySettings, MfaPolicySettings,
    MobileConfirmationPolicySettings, SecurityPolicy, SessionManagementSettings,
};
pub use sms::SmsSettings;
