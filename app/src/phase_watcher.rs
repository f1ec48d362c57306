//! Background bridge-phase watcher
//!
//! Follows the session's phase channel and logs every transition, so a
//! headless run leaves a readable trail of approvals, swaps and outcomes.

use bridge_widget::modal::explorer_url;
use bridge_widget::{BridgePhase, BridgeSession};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Start watching. The task ends when the session is dropped.
pub fn spawn(session: &BridgeSession) -> JoinHandle<()> {
    let phases = session.subscribe_phase();
    let explorer = session.config().explorer_tx_base_url.clone();
    tokio::spawn(watch_phases(phases, explorer))
}

async fn watch_phases(mut phases: watch::Receiver<BridgePhase>, explorer: String) {
    while phases.changed().await.is_ok() {
        let phase = phases.borrow_and_update().clone();
        log_phase(&phase, &explorer);
    }
    tracing::debug!("Phase watcher stopped");
}

fn log_phase(phase: &BridgePhase, explorer: &str) {
    match phase {
        BridgePhase::Idle => tracing::debug!("Bridge idle"),
        BridgePhase::Success { tx_hash } => {
            tracing::info!(?tx_hash, url = %explorer_url(explorer, tx_hash), "Bridge succeeded")
        }
        BridgePhase::Failed { message } => tracing::warn!("Bridge failed: {}", message),
        BridgePhase::AwaitingApprovalConfirmation {
            index,
            total,
            tx_hash,
        } => tracing::info!(index, total, ?tx_hash, "Approval submitted"),
        BridgePhase::AwaitingSwapConfirmation { tx_hash } => {
            tracing::info!(?tx_hash, "Bridge transaction submitted")
        }
        other => {
            if let Some(step) = other.step_text() {
                tracing::debug!("{}", step);
            }
        }
    }
}
