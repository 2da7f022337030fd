// Aggregation engine: bot filtering, bucket keys, counts and site selection

mod common;

use chrono_tz::Tz;
use common::{HEALTH_CHECK_UA, utc_millis, visit};
use visitboard::aggregation::*;
use visitboard::models::{BAR_BACKGROUND_COLOR, Granularity, VisitRecord};

fn three_visits() -> Vec<VisitRecord> {
    vec![
        visit(utc_millis(2024, 1, 1, 10)),
        visit(utc_millis(2024, 1, 1, 14)),
        visit(utc_millis(2024, 1, 2, 9)),
    ]
}

#[test]
fn filter_human_drops_empty_missing_and_marked_agents() {
    let records = vec![
        visit(1),
        VisitRecord::new("10.0.0.1", 2, "desktop", None),
        VisitRecord::new("10.0.0.2", 3, "desktop", Some("")),
        VisitRecord::new("10.0.0.3", 4, "desktop", Some(HEALTH_CHECK_UA)),
    ];
    let kept = filter_human(&records);
    assert_eq!(kept, vec![visit(1)]);
}

#[test]
fn filter_human_is_idempotent() {
    let records = vec![
        visit(1),
        VisitRecord::new("10.0.0.2", 3, "mobile", Some("")),
        VisitRecord::new("10.0.0.3", 4, "desktop", Some(HEALTH_CHECK_UA)),
        visit(5),
    ];
    let once = filter_human(&records);
    let twice = filter_human(&once);
    assert_eq!(once, twice);
}

#[test]
fn marker_match_is_case_sensitive_substring() {
    assert!(!is_human(&VisitRecord::new("a", 0, "", Some("probe vercel-screenshot"))));
    assert!(is_human(&VisitRecord::new("a", 0, "", Some("Vercel"))));
}

#[test]
fn aggregate_empty_input_is_empty_for_both_granularities() {
    let clock = LocalClock::default();
    for g in [Granularity::Day, Granularity::Hour] {
        let agg = aggregate(&[], g, &clock);
        assert!(agg.is_empty());
        assert!(agg.keys().is_empty());
        assert!(agg.counts().is_empty());
    }
}

#[test]
fn aggregate_by_day_groups_same_date() {
    let agg = aggregate(&three_visits(), Granularity::Day, &LocalClock::default());
    assert_eq!(agg.len(), 2);
    assert_eq!(agg.get("2024-01-01"), Some(2));
    assert_eq!(agg.get("2024-01-02"), Some(1));
    assert_eq!(agg.keys(), vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(agg.counts(), vec![2, 1]);
}

#[test]
fn aggregate_by_hour_separates_hours() {
    let agg = aggregate(&three_visits(), Granularity::Hour, &LocalClock::default());
    assert_eq!(
        agg.keys(),
        vec!["2024-01-01 10:00", "2024-01-01 14:00", "2024-01-02 9:00"]
    );
    assert_eq!(agg.counts(), vec![1, 1, 1]);
}

#[test]
fn aggregate_keeps_first_seen_order_not_chronological() {
    let records = vec![
        visit(utc_millis(2024, 3, 5, 0)),
        visit(utc_millis(2024, 3, 1, 0)),
        visit(utc_millis(2024, 3, 5, 12)),
    ];
    let agg = aggregate(&records, Granularity::Day, &LocalClock::default());
    assert_eq!(agg.keys(), vec!["2024-03-05", "2024-03-01"]);
    assert_eq!(agg.counts(), vec![2, 1]);
}

#[test]
fn aggregate_excludes_synthetic_and_agentless_records() {
    let ts = utc_millis(2024, 1, 1, 10);
    let records = vec![
        visit(ts),
        VisitRecord::new("10.0.0.3", ts, "desktop", Some(HEALTH_CHECK_UA)),
        VisitRecord::new("10.0.0.4", ts, "desktop", Some("")),
        VisitRecord::new("10.0.0.5", ts, "desktop", None),
    ];
    let agg = aggregate(&records, Granularity::Day, &LocalClock::default());
    assert_eq!(agg.total(), 1);
}

#[test]
fn bucket_key_follows_clock_timezone() {
    // 2024-01-01 03:00 UTC is still Dec 31 in New York.
    let ts = utc_millis(2024, 1, 1, 3);
    let ny = LocalClock::new(Tz::America__New_York, DEFAULT_DATE_FORMAT);
    assert_eq!(
        bucket_key(ts, Granularity::Day, &ny).as_deref(),
        Some("2023-12-31")
    );
    assert_eq!(
        bucket_key(ts, Granularity::Hour, &ny).as_deref(),
        Some("2023-12-31 22:00")
    );
    assert_eq!(
        bucket_key(ts, Granularity::Day, &LocalClock::default()).as_deref(),
        Some("2024-01-01")
    );
}

#[test]
fn bucket_key_uses_configured_date_format() {
    let clock = LocalClock::new(Tz::UTC, "%-m/%-d/%Y");
    let ts = utc_millis(2024, 1, 2, 0);
    assert_eq!(
        bucket_key(ts, Granularity::Day, &clock).as_deref(),
        Some("1/2/2024")
    );
    assert_eq!(
        bucket_key(ts, Granularity::Hour, &clock).as_deref(),
        Some("1/2/2024 0:00")
    );
}

#[test]
fn bucket_key_out_of_range_timestamp_is_none() {
    assert!(bucket_key(i64::MAX, Granularity::Day, &LocalClock::default()).is_none());
    let agg = aggregate(&[visit(i64::MAX)], Granularity::Day, &LocalClock::default());
    assert!(agg.is_empty());
}

#[test]
fn select_displayed_sites_empty_selection_shows_all() {
    let available = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let none: [&str; 0] = [];
    assert_eq!(select_displayed_sites(&none, &available), available);
}

#[test]
fn select_displayed_sites_intersects_in_available_order() {
    let available = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    assert_eq!(select_displayed_sites(&["B"], &available), vec!["B"]);
    assert_eq!(select_displayed_sites(&["C", "A"], &available), vec!["A", "C"]);
    assert!(select_displayed_sites(&["Z"], &available).is_empty());
}

#[test]
fn build_series_labels_and_styles_site() {
    let series = build_series("CPMCC", &three_visits(), Granularity::Day, &LocalClock::default());
    assert_eq!(series.label, "CPMCC Visitors");
    assert_eq!(series.labels, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(series.counts, vec![2, 1]);
    assert_eq!(series.background_color, BAR_BACKGROUND_COLOR);
}
