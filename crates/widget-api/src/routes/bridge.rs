//! Bridge and modal endpoints
//!
//! Bridging runs in the background; poll GET /session for progress.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use bridge_widget::SessionView;

use crate::dto::{bridge_error, ErrorResponse};
use crate::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/bridge", post(start_bridge))
        .route("/modal/retry", post(retry))
        .route("/modal/dismiss", post(dismiss))
}

/// POST /bridge - Start bridging the entered amount
pub async fn start_bridge(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<SessionView>), ErrorResponse> {
    state.session().start_bridge().await.map_err(bridge_error)?;
    Ok((StatusCode::ACCEPTED, Json(state.session().view().await)))
}

/// POST /modal/retry - Run the bridge again from the start
pub async fn retry(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<SessionView>), ErrorResponse> {
    state.session().start_retry().await.map_err(bridge_error)?;
    Ok((StatusCode::ACCEPTED, Json(state.session().view().await)))
}

/// POST /modal/dismiss - Close the modal
pub async fn dismiss(
    State(state): State<ApiState>,
) -> Result<Json<SessionView>, ErrorResponse> {
    state.session().dismiss().map_err(bridge_error)?;
    Ok(Json(state.session().view().await))
}
