//! Health check endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::ApiState;

/// GET /health - Service liveness plus wallet connection
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    let wallet_connected = state.session().account().await.is_some();
    Json(HealthResponse {
        wallet_connected,
        ..HealthResponse::default()
    })
}
