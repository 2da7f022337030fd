// GET /api/visitors?db=<site> — every visit record for one allow-listed site

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use super::{AppState, first_param};
use crate::error::{ApiError, INVALID_SITE_MESSAGE};
use crate::models::{VisitRecord, find_site};

pub(super) async fn visitors_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<VisitRecord>>, ApiError> {
    let Query(params) = query.map_err(|_| ApiError::InvalidRequest(INVALID_SITE_MESSAGE))?;
    // Repeated `db` parameters: the first one wins.
    let db = first_param(&params, "db").unwrap_or_default();
    let site = find_site(&state.config.sites, db)
        .ok_or(ApiError::InvalidRequest(INVALID_SITE_MESSAGE))?;

    let records = state
        .store
        .fetch_all(&site.db)
        .await
        .map_err(|e| ApiError::RetrievalFailure(format!("site {}: {}", site.db, e)))?;
    Ok(Json(records))
}
