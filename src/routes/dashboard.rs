// GET /api/dashboard?granularity=day|hour&sites=A,B — chart data for the selected sites

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use super::{AppState, first_param};
use crate::dashboard::{DashboardRender, DashboardView, SelectionState, StoreSource, load_all};
use crate::error::{ApiError, INVALID_GRANULARITY_MESSAGE};
use crate::models::Granularity;

/// `granularity` takes its first value. `sites` holds comma-separated display names and may
/// repeat; absent or empty shows every loaded site.
pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<DashboardRender>, ApiError> {
    let Query(params) =
        query.map_err(|_| ApiError::InvalidRequest(INVALID_GRANULARITY_MESSAGE))?;
    let granularity = match first_param(&params, "granularity") {
        None | Some("") => Granularity::default(),
        Some(g) => g
            .parse()
            .map_err(|_| ApiError::InvalidRequest(INVALID_GRANULARITY_MESSAGE))?,
    };
    let selection: SelectionState = params
        .iter()
        .filter(|(k, _)| k == "sites")
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let source = StoreSource::new(state.store.clone());
    let loaded = load_all(
        &source,
        &state.config.sites,
        state.config.dashboard.load_policy,
        state.config.dashboard.request_timeout(),
    )
    .await
    .map_err(|e| ApiError::RetrievalFailure(e.to_string()))?;

    let mut view = DashboardView::new(loaded, state.config.dashboard.clock());
    view.set_selection(selection);
    view.set_granularity(granularity);
    Ok(Json(view.render()))
}
