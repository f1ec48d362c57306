//! Bridge card state and amount input

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use bridge_widget::SessionView;

use crate::dto::{bridge_error, AmountRequest, ErrorResponse};
use crate::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/amount", put(set_amount))
        .route("/amount/max", post(set_max))
        .route("/points/refresh", post(refresh_points))
}

/// GET /session - Current card snapshot
pub async fn get_session(State(state): State<ApiState>) -> Json<SessionView> {
    Json(state.session().view().await)
}

/// PUT /amount - Replace the entered amount
pub async fn set_amount(
    State(state): State<ApiState>,
    Json(request): Json<AmountRequest>,
) -> Json<SessionView> {
    Json(state.session().set_amount(request.amount).await)
}

/// POST /amount/max - Fill the amount with the wallet balance
pub async fn set_max(
    State(state): State<ApiState>,
) -> Result<Json<SessionView>, ErrorResponse> {
    let view = state.session().set_max().await.map_err(bridge_error)?;
    Ok(Json(view))
}

/// POST /points/refresh - Re-read the points balance
pub async fn refresh_points(
    State(state): State<ApiState>,
) -> Result<Json<SessionView>, ErrorResponse> {
    state
        .session()
        .refresh_points()
        .await
        .map_err(bridge_error)?;
    Ok(Json(state.session().view().await))
}
