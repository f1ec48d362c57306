//! wallet-rpc: Ethereum wallet client over JSON-RPC
//!
//! Talks to a wallet that exposes the standard JSON-RPC interface (a local
//! signer such as Frame, or any node with managed accounts). Key custody and
//! signing stay inside the wallet; this crate only submits requests and
//! polls for receipts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ethers::contract::abigen;
use ethers::providers::{Http, JsonRpcClient, Middleware, Provider, ProviderError, RpcError};
use ethers::types::U64;
use gho_core::{checksummed, Address, TokenAmount, TxHash, WalletConfig};
use thiserror::Error;

pub use ethers::types::{TransactionReceipt, TransactionRequest};

/// EIP-1193 "user rejected request"
const USER_REJECTED_CODE: i64 = 4001;

abigen!(
    Erc20,
    r#"[
        function balanceOf(address owner) external view returns (uint256)
    ]"#
);

/// Errors from the wallet JSON-RPC endpoint
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid wallet RPC URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Wallet unreachable: {0}")]
    Provider(ProviderError),

    #[error("User rejected the request: {message}")]
    Rejected { message: String },

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Token balance call failed: {0}")]
    Contract(String),

    #[error("Transaction {tx_hash:?} not confirmed after {waited_secs}s")]
    ReceiptTimeout { tx_hash: TxHash, waited_secs: u64 },

    #[error("Transaction {tx_hash:?} reverted")]
    Reverted { tx_hash: TxHash },
}

impl WalletError {
    fn from_rpc(code: i64, message: String) -> Self {
        if code == USER_REJECTED_CODE {
            Self::Rejected { message }
        } else {
            Self::Rpc { code, message }
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "wallet_misconfigured",
            Self::Provider(_) => "wallet_unreachable",
            Self::Rejected { .. } => "user_rejected",
            Self::Rpc { .. } => "wallet_rpc_error",
            Self::Contract(_) => "balance_unavailable",
            Self::ReceiptTimeout { .. } => "receipt_timeout",
            Self::Reverted { .. } => "transaction_reverted",
        }
    }
}

/// JSON-RPC error objects (user rejection in particular) keep their code.
impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        if let Some(rpc) = err.as_error_response() {
            return Self::from_rpc(rpc.code, rpc.message.clone());
        }
        Self::Provider(err)
    }
}

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Status `0x0` is a revert; receipts without a status predate Byzantium.
pub fn receipt_succeeded(receipt: &TransactionReceipt) -> bool {
    receipt.status != Some(U64::zero())
}

/// Wallet client over any ethers JSON-RPC transport
pub struct RpcWallet<P = Http> {
    provider: Arc<Provider<P>>,
    balance_token: Address,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

impl RpcWallet<Http> {
    pub fn new(config: &WalletConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str()).map_err(|e| {
            WalletError::InvalidUrl {
                url: config.rpc_url.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Self::with_provider(provider, config))
    }
}

impl<P: JsonRpcClient + 'static> RpcWallet<P> {
    pub fn with_provider(provider: Provider<P>, config: &WalletConfig) -> Self {
        let poll_interval = Duration::from_millis(config.receipt_poll_interval_ms.max(1));
        Self {
            provider: Arc::new(provider.interval(poll_interval)),
            balance_token: config.balance_token,
            poll_interval,
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
        }
    }

    /// Accounts the wallet exposes, asking for access if none are authorized yet
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        let accounts = self.provider.get_accounts().await?;
        if !accounts.is_empty() {
            return Ok(accounts);
        }
        tracing::debug!("No authorized accounts, requesting access");
        Ok(self
            .provider
            .request::<_, Vec<Address>>("eth_requestAccounts", ())
            .await?)
    }

    /// Submit a transaction for the wallet to sign and broadcast
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash> {
        let pending = self.provider.send_transaction(tx.clone(), None).await?;
        let tx_hash = pending.tx_hash();
        tracing::info!(tx_hash = ?tx_hash, to = ?tx.to, "Transaction submitted");
        Ok(tx_hash)
    }

    /// Poll until the transaction is mined. A reverted receipt is returned,
    /// not treated as an error; callers decide what a revert means.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                tracing::info!(
                    tx_hash = ?tx_hash,
                    success = receipt_succeeded(&receipt),
                    "Transaction mined"
                );
                return Ok(receipt);
            }

            if started.elapsed() >= self.receipt_timeout {
                return Err(WalletError::ReceiptTimeout {
                    tx_hash,
                    waited_secs: started.elapsed().as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// ERC-20 `balanceOf(owner)`
    pub async fn erc20_balance(&self, token: Address, owner: Address) -> Result<TokenAmount> {
        let contract = Erc20::new(token, Arc::clone(&self.provider));
        let balance = contract.balance_of(owner).call().await.map_err(|e| {
            tracing::debug!(owner = %checksummed(&owner), "balanceOf failed: {}", e);
            WalletError::Contract(e.to_string())
        })?;
        Ok(TokenAmount::from(balance))
    }

    /// Balance of the configured display token
    pub async fn token_balance(&self, owner: Address) -> Result<TokenAmount> {
        self.erc20_balance(self.balance_token, owner).await
    }
}
