//! Page identity and target URL construction.
//!
//! A page's identity is its path with any leading language segment removed,
//! so `/en/about.html` and `/nl/about.html` are the same page. Switching
//! language means re-prefixing that identity.

use crate::config::SwitcherConfig;
use crate::i18n::Language;
use reqwest::Url;

/// The parts of the current URL the switcher cares about.
///
/// `query` keeps its leading `?` and `fragment` its leading `#`; both are
/// empty strings when absent, so they can be appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl Location {
    /// Parse either an absolute URL or a site-relative `path?query#fragment`.
    pub fn parse(href: &str) -> Self {
        if let Ok(url) = Url::parse(href) {
            return Self::from_url(&url);
        }

        let (rest, fragment) = match href.find('#') {
            Some(i) => href.split_at(i),
            None => (href, ""),
        };
        let (path, query) = match rest.find('?') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };

        Self::from_parts(path, query, fragment)
    }

    pub fn from_url(url: &Url) -> Self {
        let query = url.query().map(|q| format!("?{}", q)).unwrap_or_default();
        let fragment = url.fragment().map(|f| format!("#{}", f)).unwrap_or_default();
        Self::from_parts(url.path(), &query, &fragment)
    }

    fn from_parts(path: &str, query: &str, fragment: &str) -> Self {
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        // A bare "?" or "#" carries nothing worth preserving.
        let query = if query.len() > 1 { query } else { "" };
        let fragment = if fragment.len() > 1 { fragment } else { "" };

        Self {
            path,
            query: query.to_string(),
            fragment: fragment.to_string(),
        }
    }
}

/// Whether the path is the un-prefixed site root (`/` or `/index.html`).
pub fn is_site_root(config: &SwitcherConfig, path: &str) -> bool {
    let trimmed = path.trim_start_matches('/');
    trimmed.is_empty() || trimmed == config.index_page
}

/// The language named by the path's leading segment, if any.
pub fn leading_language(config: &SwitcherConfig, path: &str) -> Option<Language> {
    let first = path.trim_start_matches('/').split('/').next()?;
    if config.registry.is_supported(first) {
        config.registry.resolve(first)
    } else {
        None
    }
}

/// Resolve the language-agnostic page identity for a URL path.
///
/// The site root maps to the index page. Otherwise a leading language
/// segment (alias included) is dropped and the rest rejoined; an empty
/// remainder also maps to the index page.
pub fn resolve_page_path(config: &SwitcherConfig, path: &str) -> String {
    if is_site_root(config, path) {
        return config.index_page.clone();
    }

    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<&str> = trimmed.split('/').collect();
    if segments
        .first()
        .is_some_and(|first| config.registry.is_supported(first))
    {
        segments.remove(0);
    }

    let page = segments.join("/");
    if page.is_empty() {
        config.index_page.clone()
    } else {
        page
    }
}

/// `/<language>/<page>` without query or fragment; this is what gets probed.
pub fn target_path(config: &SwitcherConfig, language: Language, page: &str) -> String {
    let page = page.trim().trim_start_matches('/');
    let page = if page.is_empty() {
        config.index_page.as_str()
    } else {
        page
    };
    format!("/{}/{}", language, page)
}

/// Build `/<language>/<page>[?query][#fragment]`, carrying over the current
/// query string and fragment unchanged.
pub fn build_target_url(
    config: &SwitcherConfig,
    language: Language,
    page: &str,
    location: &Location,
) -> String {
    format!(
        "{}{}{}",
        target_path(config, language, page),
        location.query,
        location.fragment
    )
}
