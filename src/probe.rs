//! Best-effort page existence check.
//!
//! The probe answers one question: is the page confirmed to exist? Every
//! failure mode (unreachable host, timeout, non-2xx status) collapses into
//! [`Presence::NotConfirmed`], which callers treat the same as "absent".

use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Confirmed,
    NotConfirmed,
}

impl Presence {
    pub fn is_confirmed(self) -> bool {
        self == Presence::Confirmed
    }
}

pub trait ExistenceProbe {
    /// Check a same-origin path such as `/en/about.html`.
    fn check(&self, path: &str) -> impl Future<Output = Presence>;
}

/// HEAD-request probe against the site's origin.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    origin: String,
}

impl HttpProbe {
    pub fn new(origin: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }
}

impl ExistenceProbe for HttpProbe {
    async fn check(&self, path: &str) -> Presence {
        let url = format!("{}{}", self.origin, path);

        match self.client.head(&url).send().await {
            Ok(response) if response.status().is_success() => Presence::Confirmed,
            Ok(response) => {
                debug!("Probe {} answered {}", url, response.status());
                Presence::NotConfirmed
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                Presence::NotConfirmed
            }
        }
    }
}

/// Probe backed by a fixed set of existing paths.
///
/// Remembers every path it was asked about.
#[derive(Debug, Default)]
pub struct StaticProbe {
    present: HashSet<String>,
    checked: Mutex<Vec<String>>,
}

impl StaticProbe {
    pub fn new<I, S>(present: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: present.into_iter().map(Into::into).collect(),
            checked: Mutex::new(Vec::new()),
        }
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl ExistenceProbe for StaticProbe {
    async fn check(&self, path: &str) -> Presence {
        if let Ok(mut checked) = self.checked.lock() {
            checked.push(path.to_string());
        }

        if self.present.contains(path) {
            Presence::Confirmed
        } else {
            Presence::NotConfirmed
        }
    }
}
