use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

pub(crate) mod posts;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/posts", posts::router())
        .fallback(fallback_handler)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn fallback_handler() -> AppError {
    AppError::NotFound
}
