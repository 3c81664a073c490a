//! The language switcher component.
//!
//! On page load the switcher settles on an effective language, redirects
//! away from the bare site root, highlights the matching flag, and subscribes
//! to clicks on every flag. A click persists the choice and navigates to the
//! same page under the new language, or to that language's index page when
//! the equivalent page can't be confirmed.

use crate::config::SwitcherConfig;
use crate::dom::{Document, FlagId};
use crate::i18n::{detect_browser_language, Language, LocaleSource};
use crate::navigation::{Navigation, Navigator};
use crate::page::{
    build_target_url, is_site_root, leading_language, resolve_page_path, target_path, Location,
};
use crate::probe::ExistenceProbe;
use crate::storage::PreferenceStore;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherState {
    /// Constructed, page not yet processed
    Uninitialized,
    /// Page processed, flags subscribed, waiting for clicks
    Ready,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitcherError {
    #[error("switcher is already initialized")]
    AlreadyInitialized,
}

pub struct LanguageSwitcher<S, P, N, L> {
    config: SwitcherConfig,
    store: S,
    probe: P,
    navigator: N,
    locale: L,
    document: Mutex<Document>,
    state: SwitcherState,
    location: Option<Location>,
    subscriptions: Vec<FlagId>,
}

impl<S, P, N, L> LanguageSwitcher<S, P, N, L>
where
    S: PreferenceStore,
    P: ExistenceProbe,
    N: Navigator,
    L: LocaleSource,
{
    pub fn new(
        config: SwitcherConfig,
        document: Document,
        store: S,
        probe: P,
        navigator: N,
        locale: L,
    ) -> Self {
        Self {
            config,
            store,
            probe,
            navigator,
            locale,
            document: Mutex::new(document),
            state: SwitcherState::Uninitialized,
            location: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn state(&self) -> SwitcherState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Flags with a registered click subscription.
    pub fn subscriptions(&self) -> &[FlagId] {
        &self.subscriptions
    }

    /// First recognized flag whose attribute is exactly `lang`.
    pub fn flag_for(&self, lang: &str) -> Option<FlagId> {
        self.document()
            .flags(&self.config)
            .find(|flag| flag.lang(&self.config) == lang)
            .map(|flag| flag.id())
    }

    /// Attribute values of the flags currently marked active.
    pub fn active_languages(&self) -> Vec<String> {
        self.document().active_languages(&self.config)
    }

    /// Process the loaded page. Returns the language now displayed as active.
    ///
    /// The effective language comes from the stored preference, then the
    /// browser locale, then the default. A language named by the URL's
    /// leading segment overrides it for display and becomes the new stored
    /// preference.
    pub fn init(&mut self, location: Location) -> Result<Language, SwitcherError> {
        if self.state == SwitcherState::Ready {
            return Err(SwitcherError::AlreadyInitialized);
        }

        let effective = self.effective_language();
        debug!("Effective language: {}", effective);

        if is_site_root(&self.config, &location.path) {
            let url = build_target_url(&self.config, effective, &self.config.index_page, &location);
            info!("Redirecting site root to {}", url);
            self.navigator.replace(&url);
        }

        let subscriptions = {
            let mut document = self.document();
            document.highlight(&self.config, effective);
            document
                .flags(&self.config)
                .map(|flag| flag.id())
                .collect::<Vec<_>>()
        };
        debug!("Subscribed to {} flag(s)", subscriptions.len());
        self.subscriptions = subscriptions;

        let mut displayed = effective;
        if let Some(url_language) = leading_language(&self.config, &location.path) {
            self.document().highlight(&self.config, url_language);
            self.persist(url_language);
            displayed = url_language;
        }

        self.location = Some(location);
        self.state = SwitcherState::Ready;
        Ok(displayed)
    }

    /// Handle a click on a subscribed flag. Returns the navigation issued,
    /// or `None` when the click was ignored.
    ///
    /// A flag whose attribute is not a supported language is ignored here,
    /// even though [`Document::highlight`] treats the same flag as the
    /// default language. Highlighting must always settle on some language;
    /// a click must name one.
    ///
    /// Clicks are not serialized: if a second click lands while the first
    /// probe is in flight, both navigate and the last one issued wins.
    pub async fn handle_click(&self, flag: FlagId) -> Option<Navigation> {
        let location = self.location.as_ref()?;
        if !self.subscriptions.contains(&flag) {
            debug!("Ignoring click on unsubscribed flag {:?}", flag);
            return None;
        }

        let raw = self
            .document()
            .flag(&self.config, flag)
            .map(|element| element.lang(&self.config).to_string())?;
        let Some(language) = self.config.registry.resolve(&raw) else {
            debug!("Ignoring click on flag with unsupported language '{}'", raw);
            return None;
        };

        self.persist(language);
        self.document().highlight(&self.config, language);

        let page = resolve_page_path(&self.config, &location.path);
        let candidate_path = target_path(&self.config, language, &page);

        let url = if self.probe.check(&candidate_path).await.is_confirmed() {
            build_target_url(&self.config, language, &page, location)
        } else {
            debug!("{} not confirmed, falling back to index", candidate_path);
            build_target_url(&self.config, language, &self.config.index_page, location)
        };

        self.navigator.assign(&url);
        Some(Navigation::Assign(url))
    }

    fn effective_language(&self) -> Language {
        let stored = match self.store.get(&self.config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                debug!("Could not read stored language: {}", e);
                None
            }
        };

        stored
            .as_deref()
            .and_then(|value| self.config.registry.resolve(value))
            .unwrap_or_else(|| detect_browser_language(&self.config.registry, &self.locale))
    }

    fn persist(&self, language: Language) {
        if let Err(e) = self.store.set(&self.config.storage_key, language.code()) {
            debug!("Could not store language {}: {}", language, e);
        }
    }

    fn document(&self) -> MutexGuard<'_, Document> {
        // Highlighting leaves the document consistent at every step.
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::StaticLocale;
    use crate::navigation::RecordingNavigator;
    use crate::probe::StaticProbe;
    use crate::storage::{DisabledStore, MemoryStore};

    type TestSwitcher<S> = LanguageSwitcher<S, StaticProbe, RecordingNavigator, StaticLocale>;

    fn switcher_with<S: PreferenceStore>(
        store: S,
        locale: &str,
        present: &[&str],
    ) -> TestSwitcher<S> {
        let config = SwitcherConfig::default();
        let document = Document::from_registry(&config);
        LanguageSwitcher::new(
            config,
            document,
            store,
            StaticProbe::new(present.iter().copied()),
            RecordingNavigator::new(),
            StaticLocale::new(locale),
        )
    }

    fn stored(switcher: &TestSwitcher<MemoryStore>) -> Option<String> {
        switcher.store().get("preferred_language").unwrap()
    }

    // ==================== Effective Language Tests ====================

    #[test]
    fn test_stored_preference_wins_over_locale() {
        let store = MemoryStore::with_value("preferred_language", "en");
        let mut switcher = switcher_with(store, "uk-UA", &[]);

        let displayed = switcher.init(Location::parse("/")).unwrap();
        assert_eq!(displayed.code(), "en");
        assert_eq!(
            switcher.navigator().last(),
            Some(Navigation::Replace("/en/index.html".to_string()))
        );
    }

    #[test]
    fn test_stored_alias_is_normalized() {
        let store = MemoryStore::with_value("preferred_language", "UA");
        let mut switcher = switcher_with(store, "en-US", &[]);

        let displayed = switcher.init(Location::parse("/")).unwrap();
        assert_eq!(displayed.code(), "uk");
    }

    #[test]
    fn test_meaningless_stored_value_falls_back_to_locale() {
        let store = MemoryStore::with_value("preferred_language", "klingon");
        let mut switcher = switcher_with(store, "en-GB", &[]);

        let displayed = switcher.init(Location::parse("/")).unwrap();
        assert_eq!(displayed.code(), "en");
    }

    #[test]
    fn test_unsupported_locale_falls_back_to_default() {
        let mut switcher = switcher_with(MemoryStore::new(), "fr-FR", &[]);

        let displayed = switcher.init(Location::parse("/index.html")).unwrap();
        assert_eq!(displayed.code(), "nl");
        assert_eq!(
            switcher.navigator().last(),
            Some(Navigation::Replace("/nl/index.html".to_string()))
        );
    }

    #[test]
    fn test_disabled_storage_uses_locale() {
        let mut switcher = switcher_with(DisabledStore, "uk-UA", &[]);

        let displayed = switcher.init(Location::parse("/")).unwrap();
        assert_eq!(displayed.code(), "uk");
    }

    // ==================== init Tests ====================

    #[test]
    fn test_init_root_redirect_keeps_query_and_fragment() {
        let mut switcher = switcher_with(MemoryStore::new(), "uk-UA", &[]);

        switcher.init(Location::parse("/?ref=ad#contact")).unwrap();
        assert_eq!(
            switcher.navigator().history(),
            vec![Navigation::Replace("/uk/index.html?ref=ad#contact".to_string())]
        );
    }

    #[test]
    fn test_init_off_root_does_not_redirect() {
        let mut switcher = switcher_with(MemoryStore::new(), "uk-UA", &[]);

        switcher.init(Location::parse("/about.html")).unwrap();
        assert!(switcher.navigator().history().is_empty());
        assert_eq!(switcher.active_languages(), vec!["uk"]);
    }

    #[test]
    fn test_init_root_does_not_persist_derived_language() {
        let mut switcher = switcher_with(MemoryStore::new(), "uk-UA", &[]);

        switcher.init(Location::parse("/")).unwrap();
        assert!(stored(&switcher).is_none());
    }

    #[test]
    fn test_init_url_language_overrides_and_persists() {
        let store = MemoryStore::with_value("preferred_language", "nl");
        let mut switcher = switcher_with(store, "uk-UA", &[]);

        let displayed = switcher.init(Location::parse("/en/about.html")).unwrap();
        assert_eq!(displayed.code(), "en");
        assert_eq!(switcher.active_languages(), vec!["en"]);
        assert_eq!(stored(&switcher).as_deref(), Some("en"));
        assert!(switcher.navigator().history().is_empty());
    }

    #[test]
    fn test_init_url_alias_persists_canonical_code() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &[]);

        switcher.init(Location::parse("/ua/about.html")).unwrap();
        assert_eq!(stored(&switcher).as_deref(), Some("uk"));
        assert_eq!(switcher.active_languages(), vec!["uk"]);
    }

    #[test]
    fn test_init_subscribes_every_flag() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &[]);
        assert!(switcher.subscriptions().is_empty());

        switcher.init(Location::parse("/nl/")).unwrap();
        assert_eq!(switcher.subscriptions().len(), 3);
        assert_eq!(switcher.state(), SwitcherState::Ready);
    }

    #[test]
    fn test_init_twice_is_rejected() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &[]);

        switcher.init(Location::parse("/")).unwrap();
        let second = switcher.init(Location::parse("/"));
        assert_eq!(second.unwrap_err(), SwitcherError::AlreadyInitialized);
        assert_eq!(switcher.navigator().history().len(), 1);
    }

    // ==================== handle_click Tests ====================

    #[tokio::test]
    async fn test_click_navigates_to_existing_equivalent_page() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &["/en/about.html"]);
        switcher.init(Location::parse("/nl/about.html?x=1#top")).unwrap();

        let flag = switcher.flag_for("en").unwrap();
        let navigation = switcher.handle_click(flag).await;

        assert_eq!(
            navigation,
            Some(Navigation::Assign("/en/about.html?x=1#top".to_string()))
        );
        assert_eq!(switcher.probe().checked(), vec!["/en/about.html"]);
        assert_eq!(stored(&switcher).as_deref(), Some("en"));
        assert_eq!(switcher.active_languages(), vec!["en"]);
    }

    #[tokio::test]
    async fn test_click_falls_back_to_index_when_not_confirmed() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &[]);
        switcher.init(Location::parse("/nl/services.html")).unwrap();

        let flag = switcher.flag_for("en").unwrap();
        let navigation = switcher.handle_click(flag).await;

        assert_eq!(
            navigation,
            Some(Navigation::Assign("/en/index.html".to_string()))
        );
        assert_eq!(
            switcher.navigator().last(),
            Some(Navigation::Assign("/en/index.html".to_string()))
        );
    }

    #[tokio::test]
    async fn test_click_fallback_keeps_query_and_fragment() {
        let mut switcher = switcher_with(MemoryStore::new(), "nl", &[]);
        switcher.init(Location::parse("/nl/services.html?x=1#top")).unwrap();

        let flag = switcher.flag_for("en").unwrap();
        let navigation = switcher.handle_click(flag).await;

        assert_eq!(
            navigation,
            Some(Navigation::Assign("/en/index.html?x=1#top".to_string()))
        );
        assert_eq!(switcher.probe().checked(), vec!["/en/services.html"]);
    }

    #[tokio::test]
    async fn test_click_with_disabled_storage_still_navigates() {
        let mut switcher = switcher_with(DisabledStore, "nl", &["/uk/about.html"]);
        switcher.init(Location::parse("/nl/about.html")).unwrap();

        let flag = switcher.flag_for("uk").unwrap();
        let navigation = switcher.handle_click(flag).await;

        assert_eq!(
            navigation,
            Some(Navigation::Assign("/uk/about.html".to_string()))
        );
        assert_eq!(switcher.active_languages(), vec!["uk"]);
    }

    #[tokio::test]
    async fn test_click_before_init_is_ignored() {
        let switcher = switcher_with(MemoryStore::new(), "nl", &[]);
        let flag = switcher.flag_for("en").unwrap();

        assert!(switcher.handle_click(flag).await.is_none());
        assert!(switcher.navigator().history().is_empty());
    }

    #[tokio::test]
    async fn test_click_on_unsupported_flag_aborts_silently() {
        let config = SwitcherConfig::default();
        let mut document = Document::new();
        let flags = document.add_container(&config, "language-flags", &["fr", "", "en"]);

        let mut switcher = LanguageSwitcher::new(
            config,
            document,
            MemoryStore::new(),
            StaticProbe::new(Vec::<String>::new()),
            RecordingNavigator::new(),
            StaticLocale::new("en"),
        );
        switcher.init(Location::parse("/en/about.html")).unwrap();

        assert!(switcher.handle_click(flags[0]).await.is_none());
        assert!(switcher.handle_click(flags[1]).await.is_none());
        assert!(switcher.navigator().history().is_empty());
        assert!(switcher.probe().checked().is_empty());
        assert_eq!(
            switcher.store().get("preferred_language").unwrap().as_deref(),
            Some("en")
        );
    }

    #[tokio::test]
    async fn test_click_on_unsubscribed_flag_is_ignored() {
        let config = SwitcherConfig::default();
        let mut document = Document::new();
        document.add_container(&config, "language-flags", &["nl"]);
        let outside = document.add_container(&config, "footer", &["en"]);

        let mut switcher = LanguageSwitcher::new(
            config,
            document,
            MemoryStore::new(),
            StaticProbe::new(["/en/index.html"]),
            RecordingNavigator::new(),
            StaticLocale::new("nl"),
        );
        switcher.init(Location::parse("/nl/")).unwrap();

        assert!(switcher.handle_click(outside[0]).await.is_none());
    }
}
