// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS gateway settings.

use crate::domain::binding::{BindSettings, DomainSettings};
use crate::domain::ConfigSection;
use serde::{Deserialize, Serialize};

/// SMS gateway settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsSettings {
    /// Gateway provider name.
    pub provider: String,
    /// Twilio account SID (starts with `AC`).
    pub twilio_account_sid: String,
    /// Twilio auth token.
    pub twilio_auth_token: String,
    /// Sending phone number.
    pub twilio_phone_number: String,
    /// Company name used in message templates.
    pub company_name: Option<String>,
    /// Support contact used in message templates.
    pub support_email: Option<String>,
    /// Folder holding the domain's SMS templates.
    pub template_folder: Option<String>,
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            provider: "Twilio".to_string(),
            twilio_account_sid: String::new(),
            twilio_auth_token: String::new(),
            twilio_phone_number: String::new(),
            company_name: None,
            support_email: None,
            template_folder: None,
        }
    }
}

impl BindSettings for SmsSettings {
    const NAME: &'static str = "SmsSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_string("Provider", &mut self.provider);
        section.bind_string("TwilioAccountSid", &mut self.twilio_account_sid);
        section.bind_string("TwilioAuthToken", &mut self.twilio_auth_token);
        section.bind_string("TwilioPhoneNumber", &mut self.twilio_phone_number);
        section.bind_opt_string("CompanyName", &mut self.company_name);
        section.bind_opt_string("SupportEmail", &mut self.support_email);
        section.bind_opt_string("TemplateFolder", &mut self.template_folder);
    }
}

impl DomainSettings for SmsSettings {
    const GLOBAL_SECTION: &'static str = "SmsSettings";
    const DOMAIN_SECTION: &'static str = "DomainSmsSettings";
}
