// Shared test helpers
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use visitboard::models::VisitRecord;
use visitboard::visitor_store::{StoreError, VisitorStore};

pub const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";
pub const HEALTH_CHECK_UA: &str = "vercel-healthcheck/1.0";

/// In-memory store that counts calls and can be told to fail for some sites.
#[derive(Default)]
pub struct MemoryStore {
    data: HashMap<String, Vec<VisitRecord>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, db: &str, records: Vec<VisitRecord>) -> Self {
        self.data.insert(db.to_string(), records);
        self
    }

    pub fn failing(mut self, db: &str) -> Self {
        self.failing.insert(db.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisitorStore for MemoryStore {
    async fn fetch_all(&self, site: &str) -> Result<Vec<VisitRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(site) {
            return Err(StoreError::Query {
                site: site.to_string(),
                reason: "connection reset".into(),
            });
        }
        Ok(self.data.get(site).cloned().unwrap_or_default())
    }
}

/// UTC milliseconds for a calendar date and hour.
pub fn utc_millis(year: i32, month: u32, day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

pub fn visit(timestamp: i64) -> VisitRecord {
    VisitRecord::new("203.0.113.7", timestamp, "desktop", Some(BROWSER_UA))
}
