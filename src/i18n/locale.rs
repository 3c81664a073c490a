//! Browser-locale detection.
//!
//! The visitor's locale is read from a [`LocaleSource`]: the preferred
//! locale first, then the legacy field some environments still populate.

use crate::i18n::{Language, LanguageRegistry};

/// Where the visitor's reported locale comes from.
pub trait LocaleSource {
    /// The preferred locale (e.g., "uk-UA").
    fn preferred_locale(&self) -> Option<String>;

    /// Legacy fallback field, consulted when no preferred locale is reported.
    fn legacy_locale(&self) -> Option<String> {
        None
    }
}

/// Detect the visitor's language from the reported locale.
///
/// Empty values count as unreported. Whatever is found is passed through
/// [`LanguageRegistry::normalize`], so the result is always supported.
pub fn detect_browser_language(registry: &LanguageRegistry, source: &impl LocaleSource) -> Language {
    let reported = source
        .preferred_locale()
        .filter(|locale| !locale.trim().is_empty())
        .or_else(|| source.legacy_locale());

    registry.normalize(reported.as_deref().unwrap_or(""))
}

/// A fixed locale, for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct StaticLocale {
    pub preferred: Option<String>,
    pub legacy: Option<String>,
}

impl StaticLocale {
    pub fn new(preferred: impl Into<String>) -> Self {
        Self {
            preferred: Some(preferred.into()),
            legacy: None,
        }
    }
}

impl LocaleSource for StaticLocale {
    fn preferred_locale(&self) -> Option<String> {
        self.preferred.clone()
    }

    fn legacy_locale(&self) -> Option<String> {
        self.legacy.clone()
    }
}

/// Locale read from the host.
///
/// `BROWSER_LOCALE` plays the preferred locale and the operating system's
/// locale the legacy field. POSIX forms such as `uk_UA.UTF-8` are rewritten
/// to `uk-UA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

impl LocaleSource for EnvLocale {
    fn preferred_locale(&self) -> Option<String> {
        std::env::var("BROWSER_LOCALE").ok().map(|v| posix_to_tag(&v))
    }

    fn legacy_locale(&self) -> Option<String> {
        sys_locale::get_locale().map(|v| posix_to_tag(&v))
    }
}

/// Convert `ll_CC.encoding@modifier` to `ll-CC`.
fn posix_to_tag(raw: &str) -> String {
    raw.split(['.', '@'])
        .next()
        .unwrap_or("")
        .replace('_', "-")
}
