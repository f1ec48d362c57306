//! Bridge operation state machine
//!
//! `Idle → Preparing → [AwaitingApproval → AwaitingApprovalConfirmation]*
//! → SendingSwap → AwaitingSwapConfirmation → Success`, with `Failed`
//! reachable from any non-terminal phase. A bridge that cannot start goes
//! straight from `Idle` to `Failed`. Retry and dismiss go back to `Idle`.

use gho_core::TxHash;
use serde::{Deserialize, Serialize};

/// Sub-steps of the preparation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrepareStep {
    Starting,
    FetchingQuote,
    CheckingApproval,
}

/// Where the bridge operation currently stands.
///
/// Approval indices are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum BridgePhase {
    #[default]
    Idle,
    Preparing {
        step: PrepareStep,
    },
    AwaitingApproval {
        index: usize,
        total: usize,
    },
    #[serde(rename_all = "camelCase")]
    AwaitingApprovalConfirmation {
        index: usize,
        total: usize,
        tx_hash: TxHash,
    },
    SendingSwap,
    #[serde(rename_all = "camelCase")]
    AwaitingSwapConfirmation {
        tx_hash: TxHash,
    },
    #[serde(rename_all = "camelCase")]
    Success {
        tx_hash: TxHash,
    },
    Failed {
        message: String,
    },
}

impl BridgePhase {
    /// Progress text for the modal; `None` when there is nothing to show
    pub fn step_text(&self) -> Option<&'static str> {
        let text = match self {
            Self::Idle | Self::Failed { .. } => return None,
            Self::Preparing {
                step: PrepareStep::Starting,
            } => "Preparing bridge transaction...",
            Self::Preparing {
                step: PrepareStep::FetchingQuote,
            } => "Fetching bridge quote...",
            Self::Preparing {
                step: PrepareStep::CheckingApproval,
            } => "Checking approval...",
            Self::AwaitingApproval { .. } => "Waiting for approval transaction...",
            Self::AwaitingApprovalConfirmation { .. } => "Waiting for approval confirmation...",
            Self::SendingSwap => "Sending bridge transaction...",
            Self::AwaitingSwapConfirmation { .. } => "Waiting for bridge confirmation...",
            Self::Success { .. } => "Bridge transaction successful!",
        };
        Some(text)
    }

    /// True between leaving `Idle` and reaching a terminal phase
    pub fn is_in_flight(&self) -> bool {
        !matches!(
            self,
            Self::Idle | Self::Success { .. } | Self::Failed { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failed { .. })
    }

    /// Whether `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: &BridgePhase) -> bool {
        use BridgePhase::*;

        if matches!(next, Failed { .. }) {
            return self.is_in_flight() || matches!(self, Idle);
        }
        if matches!(next, Idle) {
            return !self.is_in_flight();
        }

        match (self, next) {
            (
                Idle,
                Preparing {
                    step: PrepareStep::Starting,
                },
            ) => true,
            (Preparing { step: from }, Preparing { step: to }) => matches!(
                (from, to),
                (PrepareStep::Starting, PrepareStep::FetchingQuote)
                    | (PrepareStep::FetchingQuote, PrepareStep::CheckingApproval)
            ),
            (
                Preparing {
                    step: PrepareStep::CheckingApproval,
                },
                AwaitingApproval { index: 1, .. } | SendingSwap,
            ) => true,
            (
                AwaitingApproval { index, total },
                AwaitingApprovalConfirmation {
                    index: i, total: t, ..
                },
            ) => index == i && total == t,
            (
                AwaitingApprovalConfirmation { index, total, .. },
                AwaitingApproval { index: i, total: t },
            ) => i == &(index + 1) && total == t && i <= t,
            (AwaitingApprovalConfirmation { index, total, .. }, SendingSwap) => index == total,
            (SendingSwap, AwaitingSwapConfirmation { .. }) => true,
            (AwaitingSwapConfirmation { tx_hash }, Success { tx_hash: done }) => tx_hash == done,
            _ => false,
        }
    }
}
