//! across-client: HTTP client for the Across bridge aggregator
//!
//! Endpoints:
//! - GET /suggested-fees  (output estimate for an input amount)
//! - GET /limits          (min/max deposit bounds)
//! - GET /swap/approval   (approval + swap transactions to submit)
//!
//! Routing, pricing and settlement all happen on the Across side; this
//! crate only shapes requests and parses responses.

pub mod types;

use std::time::Duration;

use gho_core::{AcrossConfig, Address, TokenAmount};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use types::{
    DepositLimits, LimitsQuery, RelayFee, SuggestedFees, SuggestedFeesQuery, SwapApproval,
    SwapApprovalQuery, TradeType, TxRequest,
};

/// Errors from the Across API
#[derive(Debug, Error)]
pub enum AcrossError {
    #[error("Bridge API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Bridge API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse bridge API response: {0}")]
    Parse(String),
}

impl AcrossError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "bridge_api_unreachable",
            Self::Status { .. } => "bridge_api_error",
            Self::Parse(_) => "bridge_api_malformed",
        }
    }
}

/// Result type for Across client operations
pub type Result<T> = std::result::Result<T, AcrossError>;

/// Across API error body, e.g. `{"type":"AcrossApiError","code":"AMOUNT_TOO_LOW","message":"..."}`
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Across API client bound to one route (token pair + chain pair)
#[derive(Clone)]
pub struct AcrossClient {
    http: reqwest::Client,
    config: AcrossConfig,
}

impl AcrossClient {
    /// Create a client with a per-request timeout.
    pub fn new(config: AcrossConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("gho-bridge")
            .timeout(timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Build the fee-suggestion query for `amount` delivered to `recipient`
    pub fn suggested_fees_query(&self, recipient: &Address, amount: TokenAmount) -> SuggestedFeesQuery {
        SuggestedFeesQuery {
            input_token: self.config.quote_input_token,
            output_token: self.config.quote_output_token,
            origin_chain_id: self.config.origin_chain_id,
            destination_chain_id: self.config.destination_chain_id,
            recipient: *recipient,
            amount,
            skip_amount_limit: true,
            allow_unmatched_decimals: true,
        }
    }

    pub fn limits_query(&self) -> LimitsQuery {
        LimitsQuery {
            input_token: self.config.quote_input_token,
            output_token: self.config.quote_output_token,
            origin_chain_id: self.config.origin_chain_id,
            destination_chain_id: self.config.destination_chain_id,
            allow_unmatched_decimals: true,
        }
    }

    /// Build the swap/approval query. The depositor is also the recipient.
    pub fn swap_approval_query(&self, depositor: &Address, amount: TokenAmount) -> SwapApprovalQuery {
        SwapApprovalQuery {
            amount,
            input_token: self.config.input_token,
            origin_chain_id: self.config.origin_chain_id,
            output_token: self.config.swap_output_token,
            destination_chain_id: self.config.destination_chain_id,
            depositor: *depositor,
            recipient: *depositor,
            trade_type: TradeType::ExactInput,
            slippage_tolerance: self.config.slippage_tolerance,
        }
    }

    /// GET /suggested-fees
    pub async fn suggested_fees(
        &self,
        recipient: &Address,
        amount: TokenAmount,
    ) -> Result<SuggestedFees> {
        let query = self.suggested_fees_query(recipient, amount);
        self.get_json("/suggested-fees", &query).await
    }

    /// GET /limits
    pub async fn limits(&self) -> Result<DepositLimits> {
        self.get_json("/limits", &self.limits_query()).await
    }

    /// GET /swap/approval
    pub async fn swap_approval(
        &self,
        depositor: &Address,
        amount: TokenAmount,
    ) -> Result<SwapApproval> {
        let query = self.swap_approval_query(depositor, amount);
        self.get_json("/swap/approval", &query).await
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "Across request");

        let resp = self.http.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            tracing::warn!(%url, status = status.as_u16(), "Across request failed: {}", message);
            return Err(AcrossError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| AcrossError::Parse(e.to_string()))
    }
}
