//! Seams to the external collaborators: the Across API, the user's wallet,
//! and the points API.

use across_client::{AcrossClient, AcrossError, DepositLimits, SuggestedFees, SwapApproval};
use async_trait::async_trait;
use gho_core::{Address, TokenAmount, TxHash};
use points_client::{PointsClient, PointsError};
use wallet_rpc::{RpcWallet, TransactionReceipt, TransactionRequest, WalletError};

/// Bridge aggregator operations used by the widget
#[async_trait]
pub trait BridgeApi: Send + Sync {
    async fn suggested_fees(
        &self,
        recipient: &Address,
        amount: TokenAmount,
    ) -> Result<SuggestedFees, AcrossError>;

    async fn limits(&self) -> Result<DepositLimits, AcrossError>;

    async fn swap_approval(
        &self,
        depositor: &Address,
        amount: TokenAmount,
    ) -> Result<SwapApproval, AcrossError>;
}

/// The user's wallet. Signing and key custody stay on the other side.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// The active account, if the wallet exposes one
    async fn account(&self) -> Result<Option<Address>, WalletError>;

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError>;

    /// Resolve once the transaction is mined. Reverted receipts are returned.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, WalletError>;

    async fn token_balance(&self, owner: &Address) -> Result<TokenAmount, WalletError>;
}

/// Off-chain points counter
#[async_trait]
pub trait PointsApi: Send + Sync {
    /// Never fails; problems read as zero.
    async fn get_points(&self, address: &Address) -> u64;

    async fn add_points(&self, address: &Address) -> Result<(), PointsError>;
}

#[async_trait]
impl BridgeApi for AcrossClient {
    async fn suggested_fees(
        &self,
        recipient: &Address,
        amount: TokenAmount,
    ) -> Result<SuggestedFees, AcrossError> {
        AcrossClient::suggested_fees(self, recipient, amount).await
    }

    async fn limits(&self) -> Result<DepositLimits, AcrossError> {
        AcrossClient::limits(self).await
    }

    async fn swap_approval(
        &self,
        depositor: &Address,
        amount: TokenAmount,
    ) -> Result<SwapApproval, AcrossError> {
        AcrossClient::swap_approval(self, depositor, amount).await
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    async fn account(&self) -> Result<Option<Address>, WalletError> {
        Ok(self.accounts().await?.into_iter().next())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError> {
        RpcWallet::send_transaction(self, tx).await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, WalletError> {
        RpcWallet::wait_for_receipt(self, hash).await
    }

    async fn token_balance(&self, owner: &Address) -> Result<TokenAmount, WalletError> {
        RpcWallet::token_balance(self, *owner).await
    }
}

#[async_trait]
impl PointsApi for PointsClient {
    async fn get_points(&self, address: &Address) -> u64 {
        PointsClient::get_points(self, address).await
    }

    async fn add_points(&self, address: &Address) -> Result<(), PointsError> {
        PointsClient::add_points(self, address).await
    }
}
