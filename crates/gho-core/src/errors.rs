//! Error types for the GHO bridge widget

use thiserror::Error;

/// Errors from parsing user-entered or API-supplied token amounts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Amount is not a number: {input}")]
    NotNumeric { input: String },

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount has more than {max} decimal places")]
    TooManyDecimals { max: u32 },

    #[error("Amount is too large")]
    Overflow,
}

/// Errors from loading the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AmountError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "amount_empty",
            Self::NotNumeric { .. } => "amount_not_numeric",
            Self::NotPositive => "amount_not_positive",
            Self::TooManyDecimals { .. } => "amount_too_many_decimals",
            Self::Overflow => "amount_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_error_codes() {
        assert_eq!(AmountError::Empty.error_code(), "amount_empty");
        let err = AmountError::NotNumeric { input: "abc".into() };
        assert_eq!(err.error_code(), "amount_not_numeric");
        assert_eq!(err.to_string(), "Amount is not a number: abc");
    }

    #[test]
    fn test_config_error_names_path() {
        let err = ConfigError::Read {
            path: "/etc/gho-bridge.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read config file /etc/gho-bridge.json: missing"
        );
    }
}
