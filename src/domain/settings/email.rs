// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outgoing email settings.

use crate::domain::binding::{BindSettings, DomainSettings};
use crate::domain::ConfigSection;
use serde::{Deserialize, Serialize};

/// Outgoing mail settings, including per-domain branding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSettings {
    /// SMTP host name.
    pub smtp_server: String,
    /// SMTP port.
    pub smtp_port: i32,
    /// Address used in the `From` header.
    pub sender_email: String,
    /// Display name used in the `From` header.
    pub sender_name: String,
    /// SMTP user name.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Whether to use TLS.
    pub enable_ssl: bool,
    /// Company name shown in templates.
    pub company_name: Option<String>,
    /// Logo shown in templates.
    pub logo_url: Option<String>,
    /// Support contact shown in templates.
    pub support_email: Option<String>,
    /// Website link shown in templates.
    pub website_url: Option<String>,
    /// Folder holding the domain's email templates.
    pub template_folder: Option<String>,
    /// Web URL of the Ethereal test inbox.
    pub ethereal_web_url: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: 587,
            sender_email: String::new(),
            sender_name: String::new(),
            username: String::new(),
            password: String::new(),
            enable_ssl: true,
            company_name: None,
            logo_url: None,
            support_email: None,
            website_url: None,
            template_folder: None,
            ethereal_web_url: None,
        }
    }
}

impl BindSettings for EmailSettings {
    const NAME: &'static str = "EmailSettings";

    fn bind(&mut self, section: &ConfigSection<'_>) {
        section.bind_string("SmtpServer", &mut self.smtp_server);
        section.bind_parsed("SmtpPort", &mut self.smtp_port);
        section.bind_string("SenderEmail", &mut self.sender_email);
        section.bind_string("SenderName", &mut self.sender_name);
        section.bind_string("Username", &mut self.username);
        section.bind_string("Password", &mut self.password);
        section.bind_bool("EnableSsl", &mut self.enable_ssl);
        section.bind_opt_string("CompanyName", &mut self.company_name);
        section.bind_opt_string("LogoUrl", &mut self.logo_url);
        section.bind_opt_string("SupportEmail", &mut self.support_email);
        section.bind_opt_string("WebsiteUrl", &mut self.website_url);
        section.bind_opt_string("TemplateFolder", &mut self.template_folder);
        section.bind_opt_string("EtherealWebUrl", &mut self.ethereal_web_url);
    }
}

impl DomainSettings for EmailSettings {
    const GLOBAL_SECTION: &'static str = "EmailSettings";
    const DOMAIN_SECTION: &'static str = "DomainEmailSettings";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryConfigSource;
    use crate::service::ConfigurationRoot;

    #[test]
    fn test_email_defaults() {
        let settings = EmailSettings::default();
        assert_eq!(settings.smtp_port, 587);
        assert!(settings.enable_ssl);
        assert!(settings.smtp_server.is_empty());
    }

    #[test]
    fn test_email_bind_partial_section() {
        let root = ConfigurationRoot::from_source(
            MemoryConfigSource::new()
                .with_value("EmailSettings:SmtpServer", "smtp.acme.test")
                .with_value("EmailSettings:SmtpPort", "2525")
                .with_value("EmailSettings:LogoUrl", "https://acme.test/logo.png"),
        );
        let settings: EmailSettings = root.section("EmailSettings").bind();

        assert_eq!(settings.smtp_server, "smtp.acme.test");
        assert_eq!(settings.smtp_port, 2525);
        assert_eq!(settings.logo_url.as_deref(), Some("https://acme.test/logo.png"));
        assert!(settings.enable_ssl);
        assert!(settings.company_name.is_none());
    }
}
