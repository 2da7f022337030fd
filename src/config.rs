use anyhow::Context;
use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::aggregation::{DEFAULT_DATE_FORMAT, LocalClock};
use crate::dashboard::LoadPolicy;
use crate::models::{Site, default_sites};
use crate::visitor_store::DEFAULT_COLLECTION;

/// Environment variable that overrides `store.uri`.
pub const STORE_URI_ENV: &str = "MONGODB_URI";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// The allow-list of site identifiers, in dashboard display order.
    #[serde(default = "default_sites")]
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Connection string. Not validated here: an empty or bad value surfaces as a retrieval failure.
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            collection: default_collection(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// IANA timezone that bucket boundaries are computed in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// strftime format for the date part of bucket keys.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub load_policy: LoadPolicy,
    /// Per-site timeout for dashboard loads, and the HTTP retrieval client's request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            date_format: default_date_format(),
            load_policy: LoadPolicy::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".into()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.into()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl DashboardConfig {
    /// Timezone is checked in `validate`, so the UTC fallback is never hit for a loaded config.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn clock(&self) -> LocalClock {
        LocalClock::new(self.tz(), &self.date_format)
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path))?;
        let mut config = Self::load_from_str(&s)?;
        if let Ok(uri) = std::env::var(STORE_URI_ENV) {
            config.store.uri = uri;
        }
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.store.collection.is_empty(),
            "store.collection must be non-empty"
        );
        anyhow::ensure!(
            self.dashboard.timezone.parse::<Tz>().is_ok(),
            "dashboard.timezone '{}' is not a known IANA timezone",
            self.dashboard.timezone
        );
        anyhow::ensure!(
            !self.dashboard.date_format.is_empty()
                && !StrftimeItems::new(&self.dashboard.date_format).any(|i| matches!(i, Item::Error)),
            "dashboard.date_format '{}' is not a valid strftime format",
            self.dashboard.date_format
        );
        anyhow::ensure!(
            self.dashboard.request_timeout_secs > 0,
            "dashboard.request_timeout_secs must be > 0, got {}",
            self.dashboard.request_timeout_secs
        );
        anyhow::ensure!(!self.sites.is_empty(), "sites must list at least one site");

        let mut names = HashSet::new();
        let mut dbs = HashSet::new();
        for site in &self.sites {
            anyhow::ensure!(
                !site.name.is_empty() && !site.db.is_empty(),
                "sites entries need a non-empty name and db"
            );
            anyhow::ensure!(
                names.insert(site.name.as_str()),
                "sites: duplicate name '{}'",
                site.name
            );
            anyhow::ensure!(
                dbs.insert(site.db.as_str()),
                "sites: duplicate db '{}'",
                site.db
            );
        }
        Ok(())
    }
}
