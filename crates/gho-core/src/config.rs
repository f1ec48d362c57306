//! Configuration types for the GHO bridge widget
//!
//! Every field has a compiled-in default, so an empty JSON object (or no
//! config file at all) yields the production mainnet → Lens setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{constants, Address, ChainId};

/// Environment variable naming an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "GHO_BRIDGE_CONFIG";

/// Bridge aggregator (Across) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcrossConfig {
    /// API base URL (e.g., "https://app.across.to/api")
    pub base_url: String,

    /// Chain the user bridges from
    pub origin_chain_id: ChainId,

    /// Chain the user bridges to
    pub destination_chain_id: ChainId,

    /// Token spent by the swap/approval route
    pub input_token: Address,

    /// Output token of the swap/approval route (zero address = native sentinel)
    pub swap_output_token: Address,

    /// Input token used for fee suggestions and deposit limits
    pub quote_input_token: Address,

    /// Output token used for fee suggestions and deposit limits
    pub quote_output_token: Address,

    /// Slippage tolerance passed to the swap/approval endpoint
    pub slippage_tolerance: f64,
}

impl Default for AcrossConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.across.to/api".to_string(),
            origin_chain_id: constants::ETHEREUM_CHAIN_ID,
            destination_chain_id: constants::LENS_CHAIN_ID,
            input_token: constants::GHO_MAINNET,
            swap_output_token: constants::ZERO_ADDRESS,
            quote_input_token: constants::GHO_ROUTE_INPUT,
            quote_output_token: constants::GHO_LENS_OUTPUT,
            slippage_tolerance: 0.5,
        }
    }
}

/// Off-chain points API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Base URL; `/getPoints` and `/setPoints` are appended
    pub base_url: String,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://inner-circle-seven.vercel.app/api/action".to_string(),
        }
    }
}

/// Wallet JSON-RPC settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of a wallet that holds the user's keys
    pub rpc_url: String,

    /// ERC-20 token whose balance is shown on the card
    pub balance_token: Address,

    /// How often to poll for a transaction receipt (milliseconds)
    pub receipt_poll_interval_ms: u64,

    /// Give up waiting for a receipt after this long (seconds)
    pub receipt_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:1248".to_string(),
            balance_token: constants::GHO_MAINNET,
            receipt_poll_interval_ms: 4_000,
            receipt_timeout_secs: 40 * 60,
        }
    }
}

/// Presentation settings for the bridge card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Quiet period after the last amount edit before a quote is requested
    pub quote_debounce_ms: u64,

    /// Explorer link prefix; the transaction hash is appended
    pub explorer_tx_base_url: String,

    /// Points shown on the success modal
    pub points_per_bridge: u64,

    /// Token decimals
    pub token_decimals: u32,

    /// Token display symbol
    pub token_symbol: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            quote_debounce_ms: 400,
            explorer_tx_base_url: "https://etherscan.io/tx/".to_string(),
            points_per_bridge: 100,
            token_decimals: constants::GHO_DECIMALS,
            token_symbol: constants::GHO_SYMBOL.to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub across: AcrossConfig,
    pub points: PointsConfig,
    pub wallet: WalletConfig,
    pub widget: WidgetConfig,

    /// Local API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Timeout applied to every outbound HTTP request (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_port() -> u16 {
    19232
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            across: AcrossConfig::default(),
            points: PointsConfig::default(),
            wallet: WalletConfig::default(),
            widget: WidgetConfig::default(),
            api_port: default_api_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from the file named by `GHO_BRIDGE_CONFIG`, or use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.across.base_url, "https://app.across.to/api");
        assert_eq!(config.across.origin_chain_id, 1);
        assert_eq!(config.across.destination_chain_id, 232);
        assert_eq!(config.across.slippage_tolerance, 0.5);
        assert_eq!(config.across.swap_output_token, Address::zero());
        assert_eq!(config.widget.quote_debounce_ms, 400);
        assert_eq!(config.widget.token_decimals, 18);
        assert_eq!(config.api_port, 19232);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let json = r#"{ "api_port": 8080, "widget": { "quote_debounce_ms": 250 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.widget.quote_debounce_ms, 250);
        assert_eq!(config.widget.points_per_bridge, 100);
        assert_eq!(config.points.base_url, PointsConfig::default().base_url);
    }

    #[test]
    fn test_config_rejects_bad_address() {
        let json = r#"{ "wallet": { "balance_token": "0x123" } }"#;
        assert!(serde_json::from_str::<AppConfig>(json).is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.across.input_token, config.across.input_token);
        assert_eq!(parsed.wallet.rpc_url, config.wallet.rpc_url);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/gho-bridge.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
