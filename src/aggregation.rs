// Visit aggregation: bot filtering, time bucketing and per-bucket counts.
// Pure functions; every render recomputes from the full record set.

use std::fmt::Write;

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use indexmap::IndexMap;

use crate::models::{AggregatedSeries, BAR_BACKGROUND_COLOR, Granularity, VisitRecord};

/// User-agent substring of the hosting platform's health checks.
pub const SYNTHETIC_TRAFFIC_MARKER: &str = "vercel";

/// Date rendering used for bucket keys unless configured otherwise.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timezone and date format that decide where bucket boundaries fall.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalClock {
    pub tz: Tz,
    pub date_format: String,
}

impl LocalClock {
    pub fn new(tz: Tz, date_format: &str) -> Self {
        Self {
            tz,
            date_format: date_format.to_string(),
        }
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::new(Tz::UTC, DEFAULT_DATE_FORMAT)
    }
}

/// True for records that look like a person: a non-empty user agent without the health-check marker.
pub fn is_human(record: &VisitRecord) -> bool {
    match record.user_agent.as_deref() {
        Some(ua) => !ua.is_empty() && !ua.contains(SYNTHETIC_TRAFFIC_MARKER),
        None => false,
    }
}

/// Drops records without a user agent and known synthetic traffic. Best effort only.
pub fn filter_human(records: &[VisitRecord]) -> Vec<VisitRecord> {
    records.iter().filter(|r| is_human(r)).cloned().collect()
}

/// Bucket key for a timestamp: the local date, plus `" <hour>:00"` for hourly buckets.
/// Returns `None` when the timestamp is outside the representable range.
pub fn bucket_key(timestamp: i64, granularity: Granularity, clock: &LocalClock) -> Option<String> {
    let local = DateTime::from_timestamp_millis(timestamp)?.with_timezone(&clock.tz);
    let mut key = String::new();
    write!(key, "{}", local.format(&clock.date_format)).ok()?;
    if granularity == Granularity::Hour {
        write!(key, " {}:00", local.hour()).ok()?;
    }
    Some(key)
}

/// Visit counts per bucket key, in the order each key was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    buckets: IndexMap<String, u64>,
}

impl Aggregation {
    pub fn keys(&self) -> Vec<String> {
        self.buckets.keys().cloned().collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.buckets.values().copied().collect()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.buckets.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.buckets.values().sum()
    }
}

/// Filters out non-human traffic, then counts records per bucket.
pub fn aggregate(records: &[VisitRecord], granularity: Granularity, clock: &LocalClock) -> Aggregation {
    let mut buckets: IndexMap<String, u64> = IndexMap::new();
    for record in records.iter().filter(|r| is_human(r)) {
        let Some(key) = bucket_key(record.timestamp, granularity, clock) else {
            continue;
        };
        *buckets.entry(key).or_insert(0) += 1;
    }
    Aggregation { buckets }
}

/// Sites to chart. An empty selection shows every available site; otherwise the
/// selected ones, in `available` order. Unknown selections are ignored.
pub fn select_displayed_sites<S: AsRef<str>>(selection: &[S], available: &[String]) -> Vec<String> {
    if selection.is_empty() {
        return available.to_vec();
    }
    available
        .iter()
        .filter(|name| selection.iter().any(|s| s.as_ref() == name.as_str()))
        .cloned()
        .collect()
}

/// Aggregates one site's records into a chartable series labelled after the site.
pub fn build_series(
    site_name: &str,
    records: &[VisitRecord],
    granularity: Granularity,
    clock: &LocalClock,
) -> AggregatedSeries {
    let aggregation = aggregate(records, granularity, clock);
    AggregatedSeries {
        label: format!("{} Visitors", site_name),
        labels: aggregation.keys(),
        counts: aggregation.counts(),
        background_color: BAR_BACKGROUND_COLOR.to_string(),
    }
}
