//! Hand-written collaborator mocks shared by the unit tests

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use across_client::{AcrossError, DepositLimits, SuggestedFees, SwapApproval, TxRequest};
use async_trait::async_trait;
use gho_core::{Address, Bytes, TokenAmount, TxHash};
use points_client::PointsError;
use wallet_rpc::{TransactionReceipt, TransactionRequest, WalletError};

use crate::services::{BridgeApi, PointsApi, Wallet};

pub const E18: u128 = 1_000_000_000_000_000_000;
pub const USER: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08";
pub const TOKEN: &str = "0x40D16FC0246aD3160Ccc09B8D0D3A2cD28aE6C2f";
pub const ROUTER: &str = "0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5";

fn address(s: &str) -> Address {
    s.parse().unwrap()
}

pub fn user() -> Address {
    address(USER)
}

pub fn token() -> Address {
    address(TOKEN)
}

pub fn router() -> Address {
    address(ROUTER)
}

pub fn hash(n: usize) -> TxHash {
    TxHash::from_low_u64_be(n as u64)
}

pub fn gho(units: u128) -> TokenAmount {
    TokenAmount::from_base_units(units)
}

pub fn sample_limits() -> DepositLimits {
    DepositLimits {
        min_deposit: gho(5 * E18),
        max_deposit: gho(1000 * E18),
        max_deposit_instant: None,
        max_deposit_short_delay: None,
        recommended_deposit_instant: None,
    }
}

pub fn direct_route(value: Option<TokenAmount>) -> SwapApproval {
    SwapApproval {
        approval_txns: None,
        swap_tx: TxRequest {
            to: router(),
            data: Bytes::from(vec![0xad, 0x54, 0x25, 0xc6]),
            value,
            chain_id: Some(1),
        },
        expected_output_amount: None,
        min_output_amount: None,
        expected_fill_time: None,
    }
}

pub fn approval_route(approvals: usize) -> SwapApproval {
    let approval = TxRequest {
        to: token(),
        data: Bytes::from(vec![0x09, 0x5e, 0xa7, 0xb3]),
        value: None,
        chain_id: Some(1),
    };
    SwapApproval {
        approval_txns: Some(vec![approval; approvals]),
        ..direct_route(None)
    }
}

fn api_error() -> AcrossError {
    AcrossError::Status {
        status: 400,
        message: "Amount too low".to_string(),
    }
}

/// Across API stand-in. `None` fields answer with an API error.
///
/// Fee suggestions quote 99.9% of the input amount, so each answer can be
/// traced back to the request that produced it.
pub struct MockApi {
    pub limits: Option<DepositLimits>,
    pub fees: Option<SuggestedFees>,
    pub swap: Option<SwapApproval>,
    /// Held before answering a fee request
    pub fee_delay: Option<Duration>,
    pub fee_calls: Mutex<Vec<TokenAmount>>,
    pub swap_calls: AtomicUsize,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            limits: Some(sample_limits()),
            fees: Some(SuggestedFees {
                output_amount: None,
                total_relay_fee: None,
                estimated_fill_time_sec: Some(4),
                is_amount_too_low: Some(false),
            }),
            swap: Some(direct_route(None)),
            fee_delay: None,
            fee_calls: Mutex::new(Vec::new()),
            swap_calls: AtomicUsize::new(0),
        }
    }
}

impl MockApi {
    pub fn fee_calls(&self) -> Vec<TokenAmount> {
        self.fee_calls.lock().unwrap().clone()
    }
}

pub fn quoted_output(amount: TokenAmount) -> TokenAmount {
    TokenAmount::from_base_units(amount.base_units() * 999u64 / 1000u64)
}

#[async_trait]
impl BridgeApi for MockApi {
    async fn suggested_fees(
        &self,
        _recipient: &Address,
        amount: TokenAmount,
    ) -> Result<SuggestedFees, AcrossError> {
        self.fee_calls.lock().unwrap().push(amount);
        if let Some(delay) = self.fee_delay {
            tokio::time::sleep(delay).await;
        }
        let mut fees = self.fees.clone().ok_or_else(api_error)?;
        fees.output_amount = Some(quoted_output(amount));
        Ok(fees)
    }

    async fn limits(&self) -> Result<DepositLimits, AcrossError> {
        self.limits.clone().ok_or_else(api_error)
    }

    async fn swap_approval(
        &self,
        _depositor: &Address,
        _amount: TokenAmount,
    ) -> Result<SwapApproval, AcrossError> {
        self.swap_calls.fetch_add(1, Ordering::SeqCst);
        self.swap.clone().ok_or_else(api_error)
    }
}

/// Wallet stand-in that records every send and receipt wait
pub struct MockWallet {
    pub account: Option<Address>,
    pub balance: TokenAmount,
    /// 1-based send numbers whose receipts revert
    pub reverted: Vec<usize>,
    /// Number of upcoming sends the user rejects
    pub fail_sends: AtomicUsize,
    pub receipt_delay: Option<Duration>,
    pub sends: AtomicUsize,
    pub events: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<TransactionRequest>>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self {
            account: Some(user()),
            balance: gho(12_500_000_000_000_000_000),
            reverted: Vec::new(),
            fail_sends: AtomicUsize::new(0),
            receipt_delay: None,
            sends: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockWallet {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Wallet for MockWallet {
    async fn account(&self) -> Result<Option<Address>, WalletError> {
        Ok(self.account)
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError> {
        let to = tx.to.as_ref().and_then(|to| to.as_address()).copied();
        self.events
            .lock()
            .unwrap()
            .push(format!("send:{:?}", to.unwrap_or_default()));
        let rejected = self
            .fail_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if rejected {
            return Err(WalletError::Rejected {
                message: "User denied transaction signature".to_string(),
            });
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(hash(self.sends.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, WalletError> {
        self.events.lock().unwrap().push(format!("wait:{:?}", tx_hash));
        if let Some(delay) = self.receipt_delay {
            tokio::time::sleep(delay).await;
        }
        let reverted = self.reverted.iter().any(|n| hash(*n) == tx_hash);
        Ok(TransactionReceipt {
            transaction_hash: tx_hash,
            block_number: Some(16u64.into()),
            status: Some(u64::from(!reverted).into()),
            ..Default::default()
        })
    }

    async fn token_balance(&self, _owner: &Address) -> Result<TokenAmount, WalletError> {
        Ok(self.balance)
    }
}

/// Points API stand-in. A successful award adds 100.
pub struct MockPoints {
    pub points: AtomicU64,
    pub fail_add: bool,
    /// Held before answering a points read
    pub get_delay: Option<Duration>,
    pub add_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
}

impl MockPoints {
    pub fn with_points(points: u64) -> Self {
        Self {
            points: AtomicU64::new(points),
            fail_add: false,
            get_delay: None,
            add_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PointsApi for MockPoints {
    async fn get_points(&self, _address: &Address) -> u64 {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.get_delay {
            tokio::time::sleep(delay).await;
        }
        self.points.load(Ordering::SeqCst)
    }

    async fn add_points(&self, _address: &Address) -> Result<(), PointsError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add {
            return Err(PointsError::Status { status: 500 });
        }
        self.points.fetch_add(100, Ordering::SeqCst);
        Ok(())
    }
}
