//! Amount validation against the deposit limits

use across_client::DepositLimits;
use gho_core::{AmountError, TokenAmount};

use crate::constants::LIMIT_DISPLAY_PLACES;

/// Outcome of checking the entered amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountValidation {
    /// Not a positive number. The action is disabled and nothing is shown.
    Invalid(AmountError),
    /// Parsed, but outside the known deposit limits
    OutOfRange { amount: TokenAmount, message: String },
    Valid(TokenAmount),
}

impl AmountValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Message to render under the input, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::OutOfRange { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Validate user input. Limits that are not known yet never reject.
pub fn validate_amount(
    input: &str,
    limits: Option<&DepositLimits>,
    decimals: u32,
    symbol: &str,
) -> AmountValidation {
    let amount = match TokenAmount::parse_decimal(input, decimals) {
        Ok(amount) if amount.is_zero() => return AmountValidation::Invalid(AmountError::NotPositive),
        Ok(amount) => amount,
        Err(e) => return AmountValidation::Invalid(e),
    };

    match limits {
        Some(limits) if !limits.contains(amount) => AmountValidation::OutOfRange {
            amount,
            message: format!(
                "The amount entered should be minimum {} and maximum {} {}.",
                limits.min_deposit.to_fixed(decimals, LIMIT_DISPLAY_PLACES),
                limits.max_deposit.to_fixed(decimals, LIMIT_DISPLAY_PLACES),
                symbol
            ),
        },
        _ => AmountValidation::Valid(amount),
    }
}
