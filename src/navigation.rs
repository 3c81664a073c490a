//! Navigation contract.
//!
//! Leaving the bare site root replaces the history entry so the back button
//! never returns to it; user-initiated switches push a normal entry.

use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// History-replacing redirect
    Replace(String),
    /// Normal navigation
    Assign(String),
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Navigation::Replace(url) | Navigation::Assign(url) => url,
        }
    }
}

pub trait Navigator {
    fn replace(&self, url: &str);
    fn assign(&self, url: &str);
}

/// Navigator that records each navigation instead of performing it.
///
/// When several navigations are issued, the last one is the one a browser
/// would end up on.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history().pop()
    }

    fn record(&self, navigation: Navigation) {
        info!("Navigating: {:?}", navigation);
        if let Ok(mut history) = self.history.lock() {
            history.push(navigation);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) {
        self.record(Navigation::Replace(url.to_string()));
    }

    fn assign(&self, url: &str) {
        self.record(Navigation::Assign(url.to_string()));
    }
}
