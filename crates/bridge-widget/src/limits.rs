//! Deposit limits, fetched once per wallet connection

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use across_client::DepositLimits;
use tokio::sync::RwLock;

use crate::services::BridgeApi;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LimitsState {
    #[default]
    Unknown,
    Loading,
    Known(DepositLimits),
}

impl LimitsState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn known(&self) -> Option<&DepositLimits> {
        match self {
            Self::Known(limits) => Some(limits),
            _ => None,
        }
    }
}

pub struct LimitsFetcher {
    api: Arc<dyn BridgeApi>,
    state: RwLock<LimitsState>,
    generation: AtomicU64,
}

impl LimitsFetcher {
    pub fn new(api: Arc<dyn BridgeApi>) -> Self {
        Self {
            api,
            state: RwLock::new(LimitsState::Unknown),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the limits. A failure leaves them unknown.
    pub async fn fetch(&self) -> LimitsState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().await = LimitsState::Loading;

        let result = self.api.limits().await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return state.clone();
        }
        *state = match result {
            Ok(limits) => {
                tracing::debug!(
                    min = %limits.min_deposit,
                    max = %limits.max_deposit,
                    "Deposit limits loaded"
                );
                LimitsState::Known(limits)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch deposit limits: {}", e);
                LimitsState::Unknown
            }
        };
        state.clone()
    }

    /// Forget the limits and drop any fetch still in progress
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = LimitsState::Unknown;
    }

    pub async fn current(&self) -> LimitsState {
        self.state.read().await.clone()
    }
}
