//! Wallet connection endpoints

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use bridge_widget::SessionView;
use gho_core::Address;

use crate::dto::{bridge_error, ApiError, ConnectRequest, ErrorResponse};
use crate::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
}

/// POST /wallet/connect - Connect the wallet's account, or a given address
pub async fn connect(
    State(state): State<ApiState>,
    request: Option<Json<ConnectRequest>>,
) -> Result<Json<SessionView>, ErrorResponse> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    match request.address {
        Some(address) => {
            let address = address.parse::<Address>().map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::new(
                        "invalid_address",
                        format!("Invalid address {}: {}", address, e),
                    )),
                )
            })?;
            state.session().connect_with(address).await;
        }
        None => {
            state.session().connect().await.map_err(bridge_error)?;
        }
    }

    Ok(Json(state.session().view().await))
}

/// POST /wallet/disconnect - Forget the connected account
pub async fn disconnect(State(state): State<ApiState>) -> Json<SessionView> {
    state.session().disconnect().await;
    Json(state.session().view().await)
}
