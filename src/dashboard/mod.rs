// Dashboard view: loaded per-site records plus the user's site toggles and granularity.
// Rendering recomputes every chart from the raw records.

mod client;
mod loader;
mod selection;

pub use client::RetrievalClient;
pub use loader::{
    FetchError, LoadError, LoadFailure, LoadPolicy, LoadedSite, LoadedSites, StoreSource,
    VisitorSource, load_all,
};
pub use selection::SelectionState;

use serde::Serialize;

use crate::aggregation::{LocalClock, build_series, select_displayed_sites};
use crate::models::{ChartData, Granularity};

pub const DASHBOARD_TITLE: &str = "CPM Websites";

/// One chart per displayed site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteChart {
    pub name: String,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRender {
    pub title: String,
    pub granularity: Granularity,
    /// Grid columns: two when more than one chart is shown.
    pub columns: u8,
    pub charts: Vec<SiteChart>,
    /// Error badges for selected sites whose load failed.
    pub failures: Vec<LoadFailure>,
}

pub struct DashboardView {
    sites: LoadedSites,
    selection: SelectionState,
    granularity: Granularity,
    clock: LocalClock,
}

impl DashboardView {
    pub fn new(sites: LoadedSites, clock: LocalClock) -> Self {
        Self {
            sites,
            selection: SelectionState::new(),
            granularity: Granularity::default(),
            clock,
        }
    }

    pub fn toggle_site(&mut self, name: &str) {
        self.selection.toggle(name);
    }

    pub fn set_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Names of sites whose data was retrieved, in allow-list order.
    pub fn available_sites(&self) -> Vec<String> {
        self.sites
            .loaded
            .iter()
            .map(|s| s.site.name.clone())
            .collect()
    }

    pub fn displayed_sites(&self) -> Vec<String> {
        select_displayed_sites(self.selection.names(), &self.available_sites())
    }

    pub fn render(&self) -> DashboardRender {
        let displayed = self.displayed_sites();
        let charts: Vec<SiteChart> = self
            .sites
            .loaded
            .iter()
            .filter(|s| displayed.contains(&s.site.name))
            .map(|s| SiteChart {
                name: s.site.name.clone(),
                chart: build_series(&s.site.name, &s.records, self.granularity, &self.clock)
                    .into(),
            })
            .collect();

        let failures = self
            .sites
            .failures
            .iter()
            .filter(|f| self.selection.is_empty() || self.selection.is_selected(&f.site))
            .cloned()
            .collect();

        DashboardRender {
            title: DASHBOARD_TITLE.to_string(),
            granularity: self.granularity,
            columns: if charts.len() > 1 { 2 } else { 1 },
            charts,
            failures,
        }
    }
}
