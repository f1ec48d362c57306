//! Display constants for the bridge card

/// Shown when a failure carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Bridge failed";

/// Fractional digits shown for the wallet balance
pub const BALANCE_DISPLAY_PLACES: u32 = 4;

/// Fractional digits shown for the quoted output
pub const QUOTE_DISPLAY_PLACES: u32 = 3;

/// Fractional digits shown for deposit limits in validation messages
pub const LIMIT_DISPLAY_PLACES: u32 = 3;
