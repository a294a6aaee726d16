// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit binding of configuration sections onto settings records.
//!
//! Every settings type implements [`BindSettings`] by hand. The binder only
//! touches fields whose keys are present, so a missing section binds to
//! `Default::default()` and a partially filled section keeps the defaults of
//! everything it does not mention.

use crate::domain::ConfigSection;

/// A settings record that can be populated from a configuration section.
pub trait BindSettings: Default + Clone + Send + Sync + 'static {
    /// Short type name used in log fields and cache keys.
    const NAME: &'static str;

    /// Assigns every field present in `section`, leaving the rest untouched.
    fn bind(&mut self, section: &ConfigSection<'_>);

    /// Builds a default instance and binds `section` onto it.
    fn from_section(section: &ConfigSection<'_>) -> Self {
        let mut settings = Self::default();
        settings.bind(section);
        settings
    }
}

/// A settings record resolved per domain with a global fallback.
///
/// Domain overrides live at `{DOMAIN_SECTION}:{domain}` and the fallback at
/// `{GLOBAL_SECTION}`.
pub trait DomainSettings: BindSettings {
    /// Section holding the global defaults.
    const GLOBAL_SECTION: &'static str;

    /// Section prefix whose children are per-domain overrides.
    const DOMAIN_SECTION: &'static str;
}

/// A plain options record bound from a single fixed section.
pub trait OptionsSection: BindSettings {
    /// The section this record is bound from.
    const SECTION: &'static str;
}
