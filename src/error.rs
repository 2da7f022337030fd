// HTTP-boundary errors. Callers see fixed messages; causes go to the log only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected before any store access.
    #[error("{0}")]
    InvalidRequest(&'static str),
    /// Store connection or query fault; the detail is logged, never returned.
    #[error("retrieval failed: {0}")]
    RetrievalFailure(String),
}

pub const INVALID_SITE_MESSAGE: &str = "Invalid database name";
pub const INVALID_GRANULARITY_MESSAGE: &str = "Invalid granularity";
pub const RETRIEVAL_FAILURE_MESSAGE: &str = "Failed to retrieve visitor data";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ApiError::RetrievalFailure(detail) => {
                tracing::error!(error = %detail, "Error fetching visitor data");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": RETRIEVAL_FAILURE_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
