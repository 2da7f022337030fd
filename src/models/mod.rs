// Domain models

mod chart;
mod granularity;
mod site;
mod visit;

pub use chart::{AggregatedSeries, BAR_BACKGROUND_COLOR, ChartData, ChartDataset};
pub use granularity::{Granularity, ParseGranularityError};
pub use site::{Site, default_sites, find_site};
pub use visit::VisitRecord;
