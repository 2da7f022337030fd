// Chart-ready series: bar labels, counts and the dataset styling the dashboard draws with

use serde::{Deserialize, Serialize};

/// Fill colour shared by every site's bars.
pub const BAR_BACKGROUND_COLOR: &str = "rgba(75, 192, 192, 0.6)";

/// Per-site bucket counts, ordered by first appearance of each bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub background_color: String,
}

/// Bar chart payload in the shape chart libraries take directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: String,
}

impl From<AggregatedSeries> for ChartData {
    fn from(series: AggregatedSeries) -> Self {
        ChartData {
            labels: series.labels,
            datasets: vec![ChartDataset {
                label: series.label,
                data: series.counts,
                background_color: series.background_color,
            }],
        }
    }
}
