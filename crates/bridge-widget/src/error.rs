//! Bridge widget errors

use across_client::AcrossError;
use gho_core::AmountError;
use points_client::PointsError;
use thiserror::Error;
use wallet_rpc::WalletError;

use crate::constants::GENERIC_FAILURE_MESSAGE;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("{0}")]
    AmountOutOfRange(String),

    #[error("A bridge transaction is already in progress")]
    InProgress,

    #[error("{0}")]
    Api(#[from] AcrossError),

    #[error("{0}")]
    Wallet(#[from] WalletError),

    #[error("{0}")]
    Points(#[from] PointsError),
}

impl BridgeError {
    /// Text for the error modal
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotConnected => "wallet_not_connected",
            Self::InvalidAmount(e) => e.error_code(),
            Self::AmountOutOfRange(_) => "amount_out_of_range",
            Self::InProgress => "bridge_in_progress",
            Self::Api(e) => e.error_code(),
            Self::Wallet(e) => e.error_code(),
            Self::Points(_) => "points_api_error",
        }
    }

    /// Get suggested HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::WalletNotConnected => 401,
            Self::InvalidAmount(_) => 400,
            Self::AmountOutOfRange(_) => 422,
            Self::InProgress => 409,
            Self::Api(AcrossError::Status { .. }) => 422,
            Self::Api(_) => 502,
            Self::Wallet(WalletError::Rejected { .. }) => 403,
            Self::Wallet(WalletError::ReceiptTimeout { .. }) => 504,
            Self::Wallet(_) => 502,
            Self::Points(_) => 502,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_display() {
        assert_eq!(
            BridgeError::WalletNotConnected.user_message(),
            "Wallet not connected"
        );
        let err = BridgeError::Api(AcrossError::Status {
            status: 400,
            message: "Amount too low".into(),
        });
        assert_eq!(
            err.user_message(),
            "Bridge API returned status 400: Amount too low"
        );
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = BridgeError::AmountOutOfRange(String::new());
        assert_eq!(err.user_message(), "Bridge failed");
    }

    #[test]
    fn test_codes() {
        assert_eq!(BridgeError::InProgress.error_code(), "bridge_in_progress");
        assert_eq!(BridgeError::InProgress.status_code(), 409);
        let rejected = BridgeError::Wallet(WalletError::Rejected {
            message: "User denied".into(),
        });
        assert_eq!(rejected.error_code(), "user_rejected");
        assert_eq!(rejected.status_code(), 403);
        assert_eq!(
            BridgeError::InvalidAmount(AmountError::Empty).error_code(),
            "amount_empty"
        );
    }
}
