//! widget-api: local HTTP API for the GHO bridge widget
//!
//! Exposes the bridge session to any front end: read the card state,
//! connect a wallet, edit the amount, start a bridge and drive the modal.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::ApiState;
