//! Modal presentation derived from the bridge phase

use gho_core::TxHash;
use serde::Serialize;

use crate::state::BridgePhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModalView {
    Hidden,
    InProgress {
        step: String,
    },
    #[serde(rename_all = "camelCase")]
    Success {
        step: String,
        tx_hash: TxHash,
        explorer_url: String,
        points_awarded: u64,
    },
    /// Offers retry and dismiss
    Error {
        message: String,
    },
}

impl ModalView {
    pub fn from_phase(phase: &BridgePhase, explorer_tx_base_url: &str, points_awarded: u64) -> Self {
        match phase {
            BridgePhase::Idle => Self::Hidden,
            BridgePhase::Failed { message } => Self::Error {
                message: message.clone(),
            },
            BridgePhase::Success { tx_hash } => Self::Success {
                step: phase.step_text().unwrap_or_default().to_string(),
                tx_hash: *tx_hash,
                explorer_url: explorer_url(explorer_tx_base_url, tx_hash),
                points_awarded,
            },
            _ => Self::InProgress {
                step: phase.step_text().unwrap_or_default().to_string(),
            },
        }
    }
}

pub fn explorer_url(base: &str, tx_hash: &TxHash) -> String {
    format!("{}{:?}", base, tx_hash)
}
