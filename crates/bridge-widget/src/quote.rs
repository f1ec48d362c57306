//! Debounced output quotes
//!
//! Every amount or account change bumps a generation counter and restarts a
//! quiet-period timer. Only the task spawned for the newest generation may
//! publish its result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use across_client::SuggestedFees;
use gho_core::{Address, TokenAmount};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::services::BridgeApi;

#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    pub quote: Option<SuggestedFees>,
    pub loading: bool,
}

impl QuoteState {
    pub fn output_amount(&self) -> Option<TokenAmount> {
        self.quote.as_ref().and_then(|q| q.output_amount)
    }
}

pub struct QuoteFetcher {
    api: Arc<dyn BridgeApi>,
    debounce: Duration,
    decimals: u32,
    generation: Arc<AtomicU64>,
    state: Arc<RwLock<QuoteState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl QuoteFetcher {
    pub fn new(api: Arc<dyn BridgeApi>, debounce: Duration, decimals: u32) -> Self {
        Self {
            api,
            debounce,
            decimals,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(QuoteState::default())),
            pending: Mutex::new(None),
        }
    }

    /// React to a new amount or account.
    ///
    /// Clears the quote immediately. A request is scheduled only for a
    /// positive amount with a known recipient.
    pub async fn update(&self, amount: &str, recipient: Option<&Address>) {
        let generation = self.cancel_pending().await;

        let amount = TokenAmount::parse_decimal(amount, self.decimals)
            .ok()
            .filter(|a| !a.is_zero());
        let (Some(amount), Some(recipient)) = (amount, recipient.copied()) else {
            *self.state.write().await = QuoteState::default();
            return;
        };

        *self.state.write().await = QuoteState {
            quote: None,
            loading: true,
        };

        let api = Arc::clone(&self.api);
        let current = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = api.suggested_fees(&recipient, amount).await;

            let mut state = state.write().await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "Discarding stale quote");
                return;
            }
            state.loading = false;
            state.quote = match result {
                Ok(fees) => Some(fees),
                Err(e) => {
                    tracing::debug!("Quote request failed: {}", e);
                    None
                }
            };
        });

        *self.pending.lock().await = Some(handle);
    }

    /// Drop the quote and any request still waiting
    pub async fn clear(&self) {
        self.cancel_pending().await;
        *self.state.write().await = QuoteState::default();
    }

    pub async fn current(&self) -> QuoteState {
        self.state.read().await.clone()
    }

    async fn cancel_pending(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
        }
        generation
    }
}
