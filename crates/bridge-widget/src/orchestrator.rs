//! The bridge sequence: fetch the route, submit approvals in order, submit
//! the swap, wait for each confirmation.
//!
//! Strictly sequential. The first error ends the run; nothing already sent
//! is rolled back.

use std::sync::Arc;

use across_client::TxRequest;
use gho_core::{Address, TokenAmount, TxHash};
use wallet_rpc::{receipt_succeeded, TransactionReceipt, TransactionRequest, WalletError};

use crate::error::Result;
use crate::services::{BridgeApi, Wallet};
use crate::state::{BridgePhase, PrepareStep};

/// A validated bridge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    pub account: Address,
    pub amount: TokenAmount,
}

pub struct BridgeOrchestrator {
    api: Arc<dyn BridgeApi>,
    wallet: Arc<dyn Wallet>,
}

impl BridgeOrchestrator {
    pub fn new(api: Arc<dyn BridgeApi>, wallet: Arc<dyn Wallet>) -> Self {
        Self { api, wallet }
    }

    /// Run one bridge attempt, reporting every phase to `on_phase`.
    ///
    /// Always ends by reporting `Success` or `Failed`.
    pub async fn run<F>(&self, request: &BridgeRequest, on_phase: F) -> Result<TxHash>
    where
        F: Fn(BridgePhase) + Send + Sync,
    {
        match self.execute(request, &on_phase).await {
            Ok(tx_hash) => {
                tracing::info!(
                    account = ?request.account,
                    amount = %request.amount,
                    ?tx_hash,
                    "Bridge transaction confirmed"
                );
                on_phase(BridgePhase::Success { tx_hash });
                Ok(tx_hash)
            }
            Err(e) => {
                tracing::warn!(account = ?request.account, "Bridge failed: {}", e);
                on_phase(BridgePhase::Failed {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    async fn execute<F>(&self, request: &BridgeRequest, on_phase: &F) -> Result<TxHash>
    where
        F: Fn(BridgePhase) + Send + Sync,
    {
        on_phase(BridgePhase::Preparing {
            step: PrepareStep::Starting,
        });

        on_phase(BridgePhase::Preparing {
            step: PrepareStep::FetchingQuote,
        });
        let route = self
            .api
            .swap_approval(&request.account, request.amount)
            .await?;

        on_phase(BridgePhase::Preparing {
            step: PrepareStep::CheckingApproval,
        });
        let approvals = route.approvals();
        let total = approvals.len();
        tracing::debug!(approvals = total, "Bridge route received");

        for (i, approval) in approvals.iter().enumerate() {
            let index = i + 1;
            on_phase(BridgePhase::AwaitingApproval { index, total });
            let tx = wallet_tx(request.account, approval, false);
            let tx_hash = self.wallet.send_transaction(&tx).await?;

            on_phase(BridgePhase::AwaitingApprovalConfirmation {
                index,
                total,
                tx_hash,
            });
            self.confirm(tx_hash).await?;
        }

        on_phase(BridgePhase::SendingSwap);
        let tx = wallet_tx(request.account, &route.swap_tx, true);
        let tx_hash = self.wallet.send_transaction(&tx).await?;

        on_phase(BridgePhase::AwaitingSwapConfirmation { tx_hash });
        self.confirm(tx_hash).await?;

        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<TransactionReceipt> {
        let receipt = self.wallet.wait_for_receipt(tx_hash).await?;
        if !receipt_succeeded(&receipt) {
            return Err(WalletError::Reverted { tx_hash }.into());
        }
        Ok(receipt)
    }
}

/// Approvals are sent without value; only the swap forwards one.
fn wallet_tx(from: Address, tx: &TxRequest, with_value: bool) -> TransactionRequest {
    let mut request = TransactionRequest::new()
        .from(from)
        .to(tx.to)
        .data(tx.data.clone());
    if let Some(chain_id) = tx.chain_id {
        request = request.chain_id(chain_id);
    }
    match tx.value {
        Some(value) if with_value => request.value(value.base_units()),
        _ => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::testing::{
        approval_route, direct_route, gho, hash, router, token, user, MockApi, MockWallet,
    };
    use gho_core::U256;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    fn request() -> BridgeRequest {
        BridgeRequest {
            account: user(),
            amount: gho(10),
        }
    }

    async fn run(api: MockApi, wallet: Arc<MockWallet>) -> (Result<TxHash>, Vec<BridgePhase>) {
        let orchestrator = BridgeOrchestrator::new(Arc::new(api), wallet);
        let phases = Mutex::new(Vec::new());
        let result = orchestrator
            .run(&request(), |phase| phases.lock().unwrap().push(phase))
            .await;
        (result, phases.into_inner().unwrap())
    }

    #[tokio::test]
    async fn test_approvals_run_in_order_before_swap() {
        let wallet = Arc::new(MockWallet::default());
        let api = MockApi {
            swap: Some(approval_route(2)),
            ..MockApi::default()
        };

        let (result, phases) = run(api, wallet.clone()).await;
        assert_eq!(result.unwrap(), hash(3));

        assert_eq!(
            wallet.events(),
            vec![
                format!("send:{:?}", token()),
                format!("wait:{:?}", hash(1)),
                format!("send:{:?}", token()),
                format!("wait:{:?}", hash(2)),
                format!("send:{:?}", router()),
                format!("wait:{:?}", hash(3)),
            ]
        );

        assert_eq!(
            phases,
            vec![
                BridgePhase::Preparing {
                    step: PrepareStep::Starting
                },
                BridgePhase::Preparing {
                    step: PrepareStep::FetchingQuote
                },
                BridgePhase::Preparing {
                    step: PrepareStep::CheckingApproval
                },
                BridgePhase::AwaitingApproval { index: 1, total: 2 },
                BridgePhase::AwaitingApprovalConfirmation {
                    index: 1,
                    total: 2,
                    tx_hash: hash(1)
                },
                BridgePhase::AwaitingApproval { index: 2, total: 2 },
                BridgePhase::AwaitingApprovalConfirmation {
                    index: 2,
                    total: 2,
                    tx_hash: hash(2)
                },
                BridgePhase::SendingSwap,
                BridgePhase::AwaitingSwapConfirmation { tx_hash: hash(3) },
                BridgePhase::Success { tx_hash: hash(3) },
            ]
        );

        let mut previous = BridgePhase::Idle;
        for phase in &phases {
            assert!(previous.can_transition_to(phase), "{:?} -> {:?}", previous, phase);
            previous = phase.clone();
        }
    }

    #[tokio::test]
    async fn test_no_approvals_goes_straight_to_swap() {
        let wallet = Arc::new(MockWallet::default());
        let api = MockApi {
            swap: Some(direct_route(Some(gho(42)))),
            ..MockApi::default()
        };

        let (result, phases) = run(api, wallet.clone()).await;
        assert_eq!(result.unwrap(), hash(1));
        assert_eq!(
            phases[3..],
            [
                BridgePhase::SendingSwap,
                BridgePhase::AwaitingSwapConfirmation { tx_hash: hash(1) },
                BridgePhase::Success { tx_hash: hash(1) },
            ]
        );

        let sent = wallet.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, Some(user()));
        assert_eq!(sent[0].value, Some(U256::from(42u64)));
        assert_eq!(sent[0].chain_id, Some(1u64.into()));
        assert_eq!(
            sent[0].data.as_ref().map(|d| d.to_vec()),
            Some(vec![0xad, 0x54, 0x25, 0xc6])
        );
    }

    #[tokio::test]
    async fn test_approvals_carry_no_value() {
        let wallet = Arc::new(MockWallet::default());
        let mut route = approval_route(1);
        route.approval_txns.as_mut().unwrap()[0].value = Some(gho(5));
        let api = MockApi {
            swap: Some(route),
            ..MockApi::default()
        };

        run(api, wallet.clone()).await.0.unwrap();
        assert_eq!(wallet.sent()[0].value, None);
    }

    #[tokio::test]
    async fn test_reverted_approval_stops_sequence() {
        let wallet = Arc::new(MockWallet {
            reverted: vec![1],
            ..MockWallet::default()
        });
        let api = MockApi {
            swap: Some(approval_route(1)),
            ..MockApi::default()
        };

        let (result, phases) = run(api, wallet.clone()).await;
        assert!(matches!(
            result,
            Err(BridgeError::Wallet(WalletError::Reverted { .. }))
        ));
        assert_eq!(wallet.sent().len(), 1);
        assert_eq!(
            phases.last(),
            Some(&BridgePhase::Failed {
                message: format!("Transaction {:?} reverted", hash(1))
            })
        );
    }

    #[tokio::test]
    async fn test_route_failure_reports_api_message() {
        let wallet = Arc::new(MockWallet::default());
        let api = MockApi {
            swap: None,
            ..MockApi::default()
        };

        let (result, phases) = run(api, wallet.clone()).await;
        assert!(matches!(result, Err(BridgeError::Api(_))));
        assert!(wallet.sent().is_empty());
        assert_eq!(
            phases.last(),
            Some(&BridgePhase::Failed {
                message: "Bridge API returned status 400: Amount too low".into()
            })
        );
    }

    #[tokio::test]
    async fn test_rejected_swap() {
        let wallet = Arc::new(MockWallet::default());
        wallet.fail_sends.store(1, Ordering::SeqCst);
        let (result, phases) = run(MockApi::default(), wallet.clone()).await;
        assert!(matches!(
            result,
            Err(BridgeError::Wallet(WalletError::Rejected { .. }))
        ));
        assert_eq!(
            phases.last(),
            Some(&BridgePhase::Failed {
                message: "User rejected the request: User denied transaction signature".into()
            })
        );
    }
}
