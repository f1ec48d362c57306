//! Request and response shapes for the Across API

use gho_core::{Address, Bytes, ChainId, TokenAmount};
use serde::{Deserialize, Serialize};

/// Query for GET /suggested-fees
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFeesQuery {
    pub input_token: Address,
    pub output_token: Address,
    pub origin_chain_id: ChainId,
    pub destination_chain_id: ChainId,
    pub recipient: Address,
    pub amount: TokenAmount,
    pub skip_amount_limit: bool,
    pub allow_unmatched_decimals: bool,
}

/// Query for GET /limits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsQuery {
    pub input_token: Address,
    pub output_token: Address,
    pub origin_chain_id: ChainId,
    pub destination_chain_id: ChainId,
    pub allow_unmatched_decimals: bool,
}

/// Query for GET /swap/approval
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapApprovalQuery {
    pub amount: TokenAmount,
    pub input_token: Address,
    pub origin_chain_id: ChainId,
    pub output_token: Address,
    pub destination_chain_id: ChainId,
    pub depositor: Address,
    pub recipient: Address,
    pub trade_type: TradeType,
    pub slippage_tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
    MinOutput,
}

/// Relay fee component of a fee suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayFee {
    /// Fee as a fraction scaled by 1e18, as returned by the API
    pub pct: String,
    pub total: TokenAmount,
}

/// Response of GET /suggested-fees.
///
/// Only `output_amount` drives the widget; the rest is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFees {
    #[serde(default)]
    pub output_amount: Option<TokenAmount>,
    #[serde(default)]
    pub total_relay_fee: Option<RelayFee>,
    #[serde(default)]
    pub estimated_fill_time_sec: Option<u64>,
    #[serde(default)]
    pub is_amount_too_low: Option<bool>,
}

/// Response of GET /limits, in base units of the input token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositLimits {
    pub min_deposit: TokenAmount,
    pub max_deposit: TokenAmount,
    #[serde(default)]
    pub max_deposit_instant: Option<TokenAmount>,
    #[serde(default)]
    pub max_deposit_short_delay: Option<TokenAmount>,
    #[serde(default)]
    pub recommended_deposit_instant: Option<TokenAmount>,
}

impl DepositLimits {
    /// Inclusive range check
    pub fn contains(&self, amount: TokenAmount) -> bool {
        amount >= self.min_deposit && amount <= self.max_deposit
    }
}

/// A transaction the wallet must submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    pub to: Address,
    pub data: Bytes,
    #[serde(default)]
    pub value: Option<TokenAmount>,
    #[serde(default)]
    pub chain_id: Option<ChainId>,
}

/// Response of GET /swap/approval
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapApproval {
    /// Approvals to submit, in order, before the swap. Absent or null when
    /// the allowance is already sufficient.
    #[serde(default)]
    pub approval_txns: Option<Vec<TxRequest>>,
    pub swap_tx: TxRequest,
    #[serde(default)]
    pub expected_output_amount: Option<TokenAmount>,
    #[serde(default)]
    pub min_output_amount: Option<TokenAmount>,
    #[serde(default)]
    pub expected_fill_time: Option<u64>,
}

impl SwapApproval {
    pub fn approvals(&self) -> &[TxRequest] {
        self.approval_txns.as_deref().unwrap_or_default()
    }
}
