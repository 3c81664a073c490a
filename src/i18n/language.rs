//! Language type: a code that has been validated against a registry.

use serde::Serialize;
use std::fmt;

/// A supported language.
///
/// Only a [`LanguageRegistry`](crate::i18n::LanguageRegistry) can construct
/// one, so holding a `Language` means the code is a member of the site's
/// supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Language {
    /// Canonical language code (e.g., "nl", "en", "uk")
    code: &'static str,
}

impl Language {
    pub(crate) fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Get the canonical language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn as_str(&self) -> &str {
        self.code
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.code
    }
}
