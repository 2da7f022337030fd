// HTTP routes

mod dashboard;
mod http;
mod visitors;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::visitor_store::VisitorStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<dyn VisitorStore>,
    pub(crate) config: AppConfig,
}

/// First value of a query parameter, like `URLSearchParams::get`.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn app(store: Arc<dyn VisitorStore>, config: AppConfig) -> Router {
    let state = AppState { store, config };
    Router::new()
        .route("/", get(|| async { "visitboard: visitor dashboard API" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/visitors", get(visitors::visitors_handler)) // GET /api/visitors?db=
        .route("/api/dashboard", get(dashboard::dashboard_handler)) // GET /api/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
