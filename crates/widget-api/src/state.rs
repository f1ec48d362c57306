//! Application state shared across API handlers

use bridge_widget::BridgeSession;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    session: BridgeSession,
}

impl ApiState {
    pub fn new(session: BridgeSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &BridgeSession {
        &self.session
    }
}
