//! Internationalization (i18n) module: which languages the site serves and
//! how arbitrary input is mapped onto them.
//!
//! # Architecture
//!
//! - `registry`: The supported language set, its aliases, and normalization
//! - `language`: Type-safe Language value produced only by the registry
//! - `locale`: Browser-locale detection
//!
//! # Example
//!
//! ```rust
//! use site_language_switcher::i18n::{LanguageRegistry, StaticLocale, detect_browser_language};
//!
//! let registry = LanguageRegistry::default();
//! assert_eq!(registry.normalize("ua").code(), "uk");
//! assert_eq!(registry.normalize("fr").code(), "nl");
//!
//! let detected = detect_browser_language(&registry, &StaticLocale::new("en-GB"));
//! assert_eq!(detected.code(), "en");
//! ```

mod language;
mod locale;
mod registry;

pub use language::Language;
pub use locale::{detect_browser_language, EnvLocale, LocaleSource, StaticLocale};
pub use registry::{LanguageConfig, LanguageRegistry, RegistryError};
