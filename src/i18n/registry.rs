//! Language registry: the set of languages the site has content for.
//!
//! Unlike a process-wide singleton, the registry is an ordinary value that is
//! built once and handed to the switcher as part of its configuration. All
//! normalization of user, browser, and URL input goes through it.

use crate::i18n::Language;
use thiserror::Error;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Code used as the URL prefix and stored preference (e.g., "nl", "uk")
    pub code: &'static str,

    /// English name of the language (e.g., "Dutch", "Ukrainian")
    pub name: &'static str,

    /// Native name of the language (e.g., "Nederlands", "Українська")
    pub native_name: &'static str,

    /// Whether this is the fallback language (exactly one must be true)
    pub is_default: bool,
}

/// Reasons a registry definition is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no default language defined")]
    NoDefault,

    #[error("multiple default languages defined: {0:?}")]
    MultipleDefaults(Vec<&'static str>),

    #[error("language code '{0}' is defined more than once")]
    DuplicateCode(&'static str),

    #[error("alias '{alias}' points to unsupported language '{target}'")]
    UnknownAliasTarget {
        alias: &'static str,
        target: &'static str,
    },
}

/// Supported languages plus the aliases folded into them.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    aliases: Vec<(&'static str, &'static str)>,
    default_index: usize,
}

impl LanguageRegistry {
    /// Build a registry from language definitions and aliases.
    ///
    /// # Arguments
    /// * `languages` - Supported languages, in display order
    /// * `aliases` - `(alias, canonical code)` pairs folded during normalization
    ///
    /// # Returns
    /// * `Ok(LanguageRegistry)` if exactly one language is the default, codes
    ///   are unique, and every alias targets a defined code
    /// * `Err(RegistryError)` describing the first violation found
    pub fn new(
        languages: Vec<LanguageConfig>,
        aliases: Vec<(&'static str, &'static str)>,
    ) -> Result<Self, RegistryError> {
        for (i, lang) in languages.iter().enumerate() {
            if languages[..i].iter().any(|other| other.code == lang.code) {
                return Err(RegistryError::DuplicateCode(lang.code));
            }
        }

        let defaults: Vec<usize> = languages
            .iter()
            .enumerate()
            .filter(|(_, lang)| lang.is_default)
            .map(|(i, _)| i)
            .collect();

        let default_index = match defaults.as_slice() {
            [] => return Err(RegistryError::NoDefault),
            [index] => *index,
            many => {
                return Err(RegistryError::MultipleDefaults(
                    many.iter().map(|&i| languages[i].code).collect(),
                ))
            }
        };

        for &(alias, target) in &aliases {
            if !languages.iter().any(|lang| lang.code == target) {
                return Err(RegistryError::UnknownAliasTarget { alias, target });
            }
        }

        Ok(Self {
            languages,
            aliases,
            default_index,
        })
    }

    /// Get a language configuration by its exact canonical code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in display order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The fallback language.
    pub fn default_language(&self) -> Language {
        Language::new(self.languages[self.default_index].code)
    }

    /// Check whether a code (or alias) names a supported language.
    ///
    /// Matching is exact; use [`resolve`](Self::resolve) for user input.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(self.canonical_alias(code)).is_some()
    }

    /// Map an alias to its canonical code; any other input is returned as-is.
    pub fn canonical_alias<'a>(&'a self, code: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == code)
            .map(|(_, target)| *target)
            .unwrap_or(code)
    }

    /// Strict normalization of user, browser, or URL input.
    ///
    /// Lower-cases the input and folds aliases. Inputs longer than two
    /// characters are cut at the first hyphen, so region-qualified tags such
    /// as `en-GB` reduce to their base language. Whitespace is not stripped.
    ///
    /// # Arguments
    /// * `input` - Any string, possibly empty (e.g., "UA", "en-GB", "fr")
    ///
    /// # Returns
    /// * `Some(Language)` if the input names a supported language
    /// * `None` otherwise
    pub fn resolve(&self, input: &str) -> Option<Language> {
        let lowered = input.to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        let mut code = self.canonical_alias(&lowered);
        if code.len() > 2 {
            if let Some((base, _region)) = code.split_once('-') {
                code = base;
            }
        }

        self.get_by_code(self.canonical_alias(code))
            .map(|config| Language::new(config.code))
    }

    /// Total normalization.
    ///
    /// # Arguments
    /// * `input` - Any string, possibly empty
    ///
    /// # Returns
    /// The language [`resolve`](Self::resolve) finds, or the default language
    /// for unrecognized or empty input.
    pub fn normalize(&self, input: &str) -> Language {
        self.resolve(input)
            .unwrap_or_else(|| self.default_language())
    }
}

impl Default for LanguageRegistry {
    /// The site's languages: Dutch (default), English, Ukrainian, with the
    /// country-style `ua` accepted for Ukrainian.
    fn default() -> Self {
        Self {
            languages: default_languages(),
            aliases: default_aliases(),
            default_index: 0,
        }
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "nl",
            name: "Dutch",
            native_name: "Nederlands",
            is_default: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
        LanguageConfig {
            code: "uk",
            name: "Ukrainian",
            native_name: "Українська",
            is_default: false,
        },
    ]
}

fn default_aliases() -> Vec<(&'static str, &'static str)> {
    vec![("ua", "uk")]
}
