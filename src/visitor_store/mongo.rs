// MongoDB-backed visitor store. One database per site, one visit-log collection in each.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Client;
use mongodb::bson::doc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::{StoreError, VisitorStore};
use crate::models::VisitRecord;

pub struct MongoStore {
    uri: String,
    collection: String,
    client: RwLock<Option<Client>>,
}

impl MongoStore {
    /// Does not connect; the client is created on first use.
    pub fn new(uri: &str, collection: &str) -> Self {
        Self {
            uri: uri.to_string(),
            collection: collection.to_string(),
            client: RwLock::new(None),
        }
    }

    /// Shared client, created once. A failed attempt leaves the slot empty, so the next call retries.
    async fn client(&self) -> Result<Client, StoreError> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(client.clone());
        }
        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        info!("visitor store client initialised");
        *slot = Some(client.clone());
        Ok(client)
    }

    pub async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }
}

#[async_trait]
impl VisitorStore for MongoStore {
    #[instrument(skip(self), fields(repo = "visitor_store", operation = "fetch_all"))]
    async fn fetch_all(&self, site: &str) -> Result<Vec<VisitRecord>, StoreError> {
        let client = self.client().await?;
        let collection = client
            .database(site)
            .collection::<VisitRecord>(&self.collection);
        let query_err = |e: mongodb::error::Error| StoreError::Query {
            site: site.to_string(),
            reason: e.to_string(),
        };
        let cursor = collection.find(doc! {}).await.map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    /// Empties the client slot; the next fetch builds a fresh client.
    async fn shutdown(&self) {
        let client = self.client.write().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            info!("visitor store client shut down");
        }
    }
}
