// Visitor store: where each site's visit log lives.
// The handle is passed explicitly (router state, dashboard sources); nothing is process-global.

mod mongo;

pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::models::VisitRecord;

/// Collection holding the visit log inside each site's database.
pub const DEFAULT_COLLECTION: &str = "mainPage";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("visitor store connection failed: {0}")]
    Connect(String),
    #[error("visitor store query on '{site}' failed: {reason}")]
    Query { site: String, reason: String },
}

#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Every record for the site, unfiltered and in store order.
    async fn fetch_all(&self, site: &str) -> Result<Vec<VisitRecord>, StoreError>;

    /// Releases connections. A later fetch reconnects.
    async fn shutdown(&self) {}
}
