//! Command-line driver: runs the switcher against a live site.
//!
//! Usage:
//!   site-language-switcher visit <url>          # Simulate a page load
//!   site-language-switcher click <lang> <url>   # Load, then click a flag
//!   site-language-switcher languages            # List supported languages
//!
//! Optional environment variables:
//! - SITE_ORIGIN (defaults to http://localhost:8000)
//! - PREFERENCE_FILE (defaults to .language-preference.json)
//! - PROBE_TIMEOUT_SECS (defaults to 5)
//! - BROWSER_LOCALE, falling back to the operating system locale

use anyhow::{bail, Context, Result};
use site_language_switcher::{
    config::Config,
    dom::Document,
    i18n::EnvLocale,
    navigation::{Navigation, RecordingNavigator},
    page::Location,
    probe::HttpProbe,
    storage::JsonFileStore,
    LanguageSwitcher,
};
use tracing::info;

type CliSwitcher = LanguageSwitcher<JsonFileStore, HttpProbe, RecordingNavigator, EnvLocale>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_language_switcher=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["languages"] => list_languages(&config),
        ["visit", url] => {
            let switcher = load_page(&config, url)?;
            print_history(&switcher);
        }
        ["click", lang, url] => {
            let switcher = load_page(&config, url)?;
            let flag = switcher
                .flag_for(lang)
                .with_context(|| format!("No flag for language '{}'", lang))?;

            if switcher.handle_click(flag).await.is_none() {
                info!("Click on '{}' was ignored", lang);
            }
            print_history(&switcher);
        }
        _ => bail!(
            "Usage: site-language-switcher visit <url> | click <lang> <url> | languages"
        ),
    }

    Ok(())
}

fn load_page(config: &Config, url: &str) -> Result<CliSwitcher> {
    let switcher_config = config.switcher.clone();
    let document = Document::from_registry(&switcher_config);
    let store = JsonFileStore::new(&config.preference_file, &config.site_origin);
    let probe = HttpProbe::new(&config.site_origin, config.probe_timeout)
        .context("Failed to build HTTP client")?;

    let mut switcher = LanguageSwitcher::new(
        switcher_config,
        document,
        store,
        probe,
        RecordingNavigator::new(),
        EnvLocale,
    );

    let displayed = switcher.init(Location::parse(url))?;
    info!("Displaying {} for {}", displayed, url);
    println!("active: {}", switcher.active_languages().join(", "));

    Ok(switcher)
}

fn print_history(switcher: &CliSwitcher) {
    let history = switcher.navigator().history();
    if history.is_empty() {
        println!("no navigation");
    }
    for navigation in history {
        let kind = match navigation {
            Navigation::Replace(_) => "replace",
            Navigation::Assign(_) => "assign",
        };
        println!("{}: {}", kind, navigation.url());
    }
}

fn list_languages(config: &Config) {
    let registry = &config.switcher.registry;
    for lang in registry.list() {
        let marker = if lang.is_default { " (default)" } else { "" };
        println!("{}  {} / {}{}", lang.code, lang.name, lang.native_name, marker);
    }
}
