use crate::i18n::LanguageRegistry;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Immutable settings the switcher is built with.
#[derive(Debug, Clone)]
pub struct SwitcherConfig {
    pub registry: LanguageRegistry,

    /// Key the preferred language is stored under
    pub storage_key: String,

    /// Canonical page name used for the site root and empty paths
    pub index_page: String,

    // Markup contract
    pub container_class: String,
    pub flag_attribute: String,
    pub active_class: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            registry: LanguageRegistry::default(),
            storage_key: "preferred_language".to_string(),
            index_page: "index.html".to_string(),
            container_class: "language-flags".to_string(),
            flag_attribute: "data-lang".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Runtime settings for the command-line driver.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin the site is served from; probes are sent here
    pub site_origin: String,

    /// JSON file standing in for the origin's local storage
    pub preference_file: PathBuf,

    pub probe_timeout: Duration,

    pub switcher: SwitcherConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let probe_timeout_secs = match std::env::var("PROBE_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("PROBE_TIMEOUT_SECS is not a number: {}", v))?,
            Err(_) => 5,
        };

        Ok(Self {
            site_origin: std::env::var("SITE_ORIGIN")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            preference_file: std::env::var("PREFERENCE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".language-preference.json")),
            probe_timeout: Duration::from_secs(probe_timeout_secs),
            switcher: SwitcherConfig::default(),
        })
    }
}
