//! Data Transfer Objects for API requests and responses

use axum::http::StatusCode;
use axum::Json;
use bridge_widget::BridgeError;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub wallet_connected: bool,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            wallet_connected: false,
        }
    }
}

/// Connect request. Without an address the wallet is asked for its account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: String,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error half of every handler result
pub type ErrorResponse = (StatusCode, Json<ApiError>);

impl From<&BridgeError> for ApiError {
    fn from(e: &BridgeError) -> Self {
        Self::new(e.error_code(), e.user_message())
    }
}

pub fn bridge_error(e: BridgeError) -> ErrorResponse {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::from(&e)),
    )
}
