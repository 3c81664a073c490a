//! Language switcher for a static multi-language website.
//!
//! The switcher picks the visitor's language (stored preference, then
//! browser locale, then the site default), redirects the bare site root to a
//! language-prefixed index, highlights the active language flag, and on flag
//! click moves to the same page under the chosen language.
//!
//! The browser is reached only through traits: [`storage::PreferenceStore`],
//! [`i18n::LocaleSource`], [`probe::ExistenceProbe`] and
//! [`navigation::Navigator`].

pub mod config;
pub mod dom;
pub mod i18n;
pub mod navigation;
pub mod page;
pub mod probe;
pub mod storage;
pub mod switcher;

pub use config::{Config, SwitcherConfig};
pub use switcher::{LanguageSwitcher, SwitcherError, SwitcherState};
