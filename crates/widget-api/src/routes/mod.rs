//! API route handlers

pub mod bridge;
pub mod health;
pub mod session;
pub mod wallet;

use axum::{routing::get, Router};

use crate::ApiState;

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(session::router())
        .merge(bridge::router())
        .nest("/wallet", wallet::router())
        .with_state(state)
}
