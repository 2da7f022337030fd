// Loads every site's records concurrently, then applies an explicit partial-failure policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Site, VisitRecord};
use crate::visitor_store::{StoreError, VisitorStore};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("retrieval endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Where the dashboard gets one site's records from.
#[async_trait]
pub trait VisitorSource: Send + Sync {
    async fn fetch_site(&self, db: &str) -> Result<Vec<VisitRecord>, FetchError>;
}

/// Reads the visitor store in-process.
pub struct StoreSource {
    store: Arc<dyn VisitorStore>,
}

impl StoreSource {
    pub fn new(store: Arc<dyn VisitorStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VisitorSource for StoreSource {
    async fn fetch_site(&self, db: &str) -> Result<Vec<VisitRecord>, FetchError> {
        Ok(self.store.fetch_all(db).await?)
    }
}

/// What one failed site call does to the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Any failed site fails the load.
    AllOrNothing,
    /// Failed sites become per-site error entries; the rest still render.
    #[default]
    DegradePerSite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSite {
    pub site: Site,
    pub records: Vec<VisitRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub site: String,
    pub message: String,
}

/// Result of one dashboard load, both lists in allow-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSites {
    pub loaded: Vec<LoadedSite>,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, thiserror::Error)]
#[error("loading '{site}' failed: {source}")]
pub struct LoadError {
    pub site: String,
    #[source]
    pub source: FetchError,
}

/// Fetches all sites concurrently and waits for every call before deciding.
/// A site that has not answered within `timeout` counts as failed.
pub async fn load_all<S>(
    source: &S,
    sites: &[Site],
    policy: LoadPolicy,
    timeout: Duration,
) -> Result<LoadedSites, LoadError>
where
    S: VisitorSource + ?Sized,
{
    let calls = sites.iter().map(|site| async move {
        let result = tokio::time::timeout(timeout, source.fetch_site(&site.db))
            .await
            .unwrap_or_else(|_| Err(FetchError::Timeout(timeout)));
        (site, result)
    });
    let outcomes = join_all(calls).await;

    let mut out = LoadedSites::default();
    for (site, result) in outcomes {
        match result {
            Ok(records) => out.loaded.push(LoadedSite {
                site: site.clone(),
                records,
            }),
            Err(e) if policy == LoadPolicy::AllOrNothing => {
                return Err(LoadError {
                    site: site.name.clone(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(site = %site.name, error = %e, "site load failed; rendering without it");
                out.failures.push(LoadFailure {
                    site: site.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(out)
}
