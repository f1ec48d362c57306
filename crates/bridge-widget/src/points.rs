//! Points counter shown on the card

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gho_core::Address;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::services::PointsApi;

/// What the card shows for the points balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PointsDisplay {
    #[default]
    Unknown,
    Loading,
    Known { points: u64 },
    /// An award was posted; the server value has not been re-read yet
    #[serde(rename_all = "camelCase")]
    Reconciling { last_known: u64 },
}

impl PointsDisplay {
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Known { points } => Some(*points),
            Self::Reconciling { last_known } => Some(*last_known),
            Self::Unknown | Self::Loading => None,
        }
    }
}

/// Every read or award takes a new generation; only the newest one, and
/// nothing started before a reset, may write the display.
pub struct PointsLedger {
    api: Arc<dyn PointsApi>,
    state: RwLock<PointsDisplay>,
    generation: AtomicU64,
}

impl PointsLedger {
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            api,
            state: RwLock::new(PointsDisplay::Unknown),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn refresh(&self, address: &Address) -> u64 {
        let generation = self.next_generation();
        self.publish(generation, PointsDisplay::Loading).await;
        let points = self.api.get_points(address).await;
        self.publish(generation, PointsDisplay::Known { points }).await;
        points
    }

    /// Award points for a completed bridge, then re-read the server value.
    ///
    /// If the award is rejected the previous value stays on screen.
    pub async fn award_and_reconcile(&self, address: &Address) -> PointsDisplay {
        let generation = self.next_generation();
        let last_known = {
            let mut state = self.state.write().await;
            let last_known = state.value().unwrap_or(0);
            *state = PointsDisplay::Reconciling { last_known };
            last_known
        };

        let next = match self.api.add_points(address).await {
            Ok(()) => PointsDisplay::Known {
                points: self.api.get_points(address).await,
            },
            Err(e) => {
                tracing::error!(?address, "Error updating points: {}", e);
                PointsDisplay::Known { points: last_known }
            }
        };
        if self.publish(generation, next).await {
            next
        } else {
            self.current().await
        }
    }

    /// Forget the balance. Reads and awards still running are discarded.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = PointsDisplay::Unknown;
    }

    pub async fn current(&self) -> PointsDisplay {
        *self.state.read().await
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn publish(&self, generation: u64, next: PointsDisplay) -> bool {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding stale points update");
            return false;
        }
        *state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{user, MockPoints};
    use std::time::Duration;

    #[tokio::test]
    async fn test_refresh() {
        let ledger = PointsLedger::new(Arc::new(MockPoints::with_points(250)));
        assert_eq!(ledger.current().await, PointsDisplay::Unknown);
        assert_eq!(ledger.refresh(&user()).await, 250);
        assert_eq!(ledger.current().await, PointsDisplay::Known { points: 250 });
    }

    #[tokio::test]
    async fn test_award_reconciles_with_server() {
        let api = Arc::new(MockPoints::with_points(200));
        let ledger = PointsLedger::new(api.clone());
        ledger.refresh(&user()).await;

        let shown = ledger.award_and_reconcile(&user()).await;
        assert_eq!(shown, PointsDisplay::Known { points: 300 });
        assert_eq!(api.add_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_award_keeps_last_known() {
        let api = Arc::new(MockPoints {
            fail_add: true,
            ..MockPoints::with_points(200)
        });
        let ledger = PointsLedger::new(api.clone());
        ledger.refresh(&user()).await;

        let shown = ledger.award_and_reconcile(&user()).await;
        assert_eq!(shown, PointsDisplay::Known { points: 200 });
        assert_eq!(api.add_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_slow_refresh() {
        let api = Arc::new(MockPoints {
            get_delay: Some(Duration::from_secs(2)),
            ..MockPoints::with_points(250)
        });
        let ledger = Arc::new(PointsLedger::new(api.clone()));

        let refresh = tokio::spawn({
            let ledger = Arc::clone(&ledger);
            async move { ledger.refresh(&user()).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ledger.current().await, PointsDisplay::Loading);

        ledger.reset().await;
        assert_eq!(refresh.await.unwrap(), 250);
        assert_eq!(api.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.current().await, PointsDisplay::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_slow_award() {
        let api = Arc::new(MockPoints {
            get_delay: Some(Duration::from_secs(2)),
            ..MockPoints::with_points(200)
        });
        let ledger = Arc::new(PointsLedger::new(api.clone()));

        let award = tokio::spawn({
            let ledger = Arc::clone(&ledger);
            async move { ledger.award_and_reconcile(&user()).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            ledger.current().await,
            PointsDisplay::Reconciling { last_known: 0 }
        );

        ledger.reset().await;
        assert_eq!(award.await.unwrap(), PointsDisplay::Unknown);
        assert_eq!(api.add_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.current().await, PointsDisplay::Unknown);
    }

    #[test]
    fn test_display_shape() {
        let value = serde_json::to_value(PointsDisplay::Reconciling { last_known: 7 }).unwrap();
        assert_eq!(value["status"], "reconciling");
        assert_eq!(value["lastKnown"], 7);
        assert_eq!(PointsDisplay::Loading.value(), None);
    }
}
