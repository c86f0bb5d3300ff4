//! Readiness endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
    products: u64,
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, AppError> {
    let products = state.products.count().await?;
    Ok(Json(ReadyResponse {
        status: "ready",
        products,
    }))
}

/// `/ready` reports the catalog size once it has been loaded.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
