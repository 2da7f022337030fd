// HTTP client for the retrieval endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::loader::{FetchError, VisitorSource};
use crate::models::VisitRecord;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct RetrievalClient {
    http: reqwest::Client,
    base_url: String,
}

impl RetrievalClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl VisitorSource for RetrievalClient {
    async fn fetch_site(&self, db: &str) -> Result<Vec<VisitRecord>, FetchError> {
        let res = self
            .http
            .get(format!("{}/api/visitors", self.base_url))
            .query(&[("db", db)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = match res.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(res.json().await?)
    }
}
