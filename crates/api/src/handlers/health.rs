use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store_healthy: bool,
}

/// GET /health
///
/// Always answers 200 while the process is serving; `store_healthy` reports
/// whether the record store responded.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store_healthy: state.catalog.store_healthy().await,
    })
}
