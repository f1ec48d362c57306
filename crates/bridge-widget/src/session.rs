//! The bridge card as a single store.
//!
//! Holds the connected account, the entered amount and the bridge phase,
//! and owns the quote, limits and points sub-stores. Front ends read
//! [`SessionView`] snapshots and subscribe to phase changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use across_client::DepositLimits;
use gho_core::{short_address, Address, TokenAmount, TxHash, WidgetConfig};
use serde::Serialize;
use tokio::sync::{watch, RwLock};

use crate::constants::{BALANCE_DISPLAY_PLACES, QUOTE_DISPLAY_PLACES};
use crate::error::{BridgeError, Result};
use crate::limits::LimitsFetcher;
use crate::modal::ModalView;
use crate::orchestrator::{BridgeOrchestrator, BridgeRequest};
use crate::points::{PointsDisplay, PointsLedger};
use crate::quote::QuoteFetcher;
use crate::services::{BridgeApi, PointsApi, Wallet};
use crate::state::BridgePhase;
use crate::validate::{validate_amount, AmountValidation};

/// Render-ready snapshot of the bridge card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub account: Option<Address>,
    pub short_address: Option<String>,
    pub connected: bool,
    /// Wallet balance, at most 4 fractional digits
    pub balance: Option<String>,
    pub amount: String,
    pub amount_error: Option<String>,
    pub can_bridge: bool,
    pub limits: Option<DepositLimits>,
    pub limits_loading: bool,
    pub quote_loading: bool,
    /// e.g. `~9.990 GHO`
    pub quote_output: Option<String>,
    pub points: PointsDisplay,
    pub phase: BridgePhase,
    pub modal: ModalView,
}

#[derive(Debug, Default)]
struct FormState {
    account: Option<Address>,
    balance: Option<TokenAmount>,
    amount: String,
}

struct Inner {
    config: WidgetConfig,
    wallet: Arc<dyn Wallet>,
    orchestrator: BridgeOrchestrator,
    quotes: QuoteFetcher,
    limits: LimitsFetcher,
    points: PointsLedger,
    form: RwLock<FormState>,
    phase: watch::Sender<BridgePhase>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the bridge task ends, however it ends
struct InFlightGuard {
    inner: Arc<Inner>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct BridgeSession {
    inner: Arc<Inner>,
}

impl BridgeSession {
    pub fn new(
        config: WidgetConfig,
        api: Arc<dyn BridgeApi>,
        wallet: Arc<dyn Wallet>,
        points: Arc<dyn PointsApi>,
    ) -> Self {
        let (phase, _) = watch::channel(BridgePhase::Idle);
        let quotes = QuoteFetcher::new(
            Arc::clone(&api),
            Duration::from_millis(config.quote_debounce_ms),
            config.token_decimals,
        );
        Self {
            inner: Arc::new(Inner {
                orchestrator: BridgeOrchestrator::new(Arc::clone(&api), Arc::clone(&wallet)),
                limits: LimitsFetcher::new(api),
                points: PointsLedger::new(points),
                quotes,
                wallet,
                config,
                form: RwLock::new(FormState::default()),
                phase,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    /// Ask the wallet for its account and connect with it
    pub async fn connect(&self) -> Result<Address> {
        let account = self
            .inner
            .wallet
            .account()
            .await?
            .ok_or(BridgeError::WalletNotConnected)?;
        self.connect_with(account).await;
        Ok(account)
    }

    /// Connect as `account`: load limits, points and balance, and re-quote
    /// the current amount for the new recipient.
    pub async fn connect_with(&self, account: Address) {
        let amount = {
            let mut form = self.inner.form.write().await;
            if form.account.as_ref() != Some(&account) {
                form.balance = None;
            }
            form.account = Some(account);
            form.amount.clone()
        };
        tracing::info!(account = %short_address(&account), "Wallet connected");

        self.inner.quotes.update(&amount, Some(&account)).await;
        tokio::join!(
            self.inner.limits.fetch(),
            self.inner.points.refresh(&account),
            self.refresh_balance(),
        );
    }

    pub async fn disconnect(&self) {
        {
            let mut form = self.inner.form.write().await;
            form.account = None;
            form.balance = None;
        }
        self.inner.quotes.clear().await;
        self.inner.limits.reset().await;
        self.inner.points.reset().await;
        // A running bridge keeps its phase until it finishes
        if let Ok(_guard) = self.try_begin() {
            self.set_phase(BridgePhase::Idle);
        }
        tracing::info!("Wallet disconnected");
    }

    pub async fn account(&self) -> Option<Address> {
        self.inner.form.read().await.account
    }

    pub async fn set_amount(&self, amount: impl Into<String>) -> SessionView {
        let amount = amount.into();
        let account = {
            let mut form = self.inner.form.write().await;
            form.amount = amount.clone();
            form.account
        };
        self.inner.quotes.update(&amount, account.as_ref()).await;
        self.view().await
    }

    /// Fill the amount with the full wallet balance
    pub async fn set_max(&self) -> Result<SessionView> {
        let (account, balance) = {
            let form = self.inner.form.read().await;
            (form.account, form.balance)
        };
        if account.is_none() {
            return Err(BridgeError::WalletNotConnected);
        }
        let balance = match balance {
            Some(balance) => balance,
            None => self.refresh_balance().await.unwrap_or(TokenAmount::ZERO),
        };
        let amount = balance.to_decimal_string(self.inner.config.token_decimals);
        Ok(self.set_amount(amount).await)
    }

    /// Re-read the wallet's token balance. Failures keep the previous value.
    pub async fn refresh_balance(&self) -> Option<TokenAmount> {
        let account = self.account().await?;
        match self.inner.wallet.token_balance(&account).await {
            Ok(balance) => {
                let mut form = self.inner.form.write().await;
                if form.account.as_ref() == Some(&account) {
                    form.balance = Some(balance);
                }
                Some(balance)
            }
            Err(e) => {
                tracing::warn!(?account, "Failed to read token balance: {}", e);
                self.inner.form.read().await.balance
            }
        }
    }

    pub async fn refresh_points(&self) -> Result<u64> {
        let account = self.account().await.ok_or(BridgeError::WalletNotConnected)?;
        Ok(self.inner.points.refresh(&account).await)
    }

    /// Run the bridge to completion.
    ///
    /// A bridge that cannot start (no wallet, bad amount) ends in `Failed`
    /// so the modal can show why. `InProgress` leaves the running phase alone.
    pub async fn bridge(&self) -> Result<TxHash> {
        let guard = self.try_begin()?;
        let request = self.begin_request().await?;
        self.run_guarded(guard, request).await
    }

    /// Validate and start the bridge in the background. Progress is
    /// observable through [`Self::view`] and [`Self::subscribe_phase`].
    pub async fn start_bridge(&self) -> Result<()> {
        let guard = self.try_begin()?;
        let request = self.begin_request().await?;
        self.spawn_guarded(guard, request);
        Ok(())
    }

    /// Start over from `Idle` and run the whole sequence again
    pub async fn retry(&self) -> Result<TxHash> {
        let guard = self.try_begin()?;
        let request = self.begin_request().await?;
        self.run_guarded(guard, request).await
    }

    pub async fn start_retry(&self) -> Result<()> {
        let guard = self.try_begin()?;
        let request = self.begin_request().await?;
        self.spawn_guarded(guard, request);
        Ok(())
    }

    /// Close the modal. Not allowed while a bridge is running.
    pub fn dismiss(&self) -> Result<()> {
        let _guard = self.try_begin()?;
        self.set_phase(BridgePhase::Idle);
        Ok(())
    }

    pub fn phase(&self) -> BridgePhase {
        self.inner.phase.borrow().clone()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<BridgePhase> {
        self.inner.phase.subscribe()
    }

    pub async fn view(&self) -> SessionView {
        let config = &self.inner.config;
        let (account, balance, amount) = {
            let form = self.inner.form.read().await;
            (form.account, form.balance, form.amount.clone())
        };
        let limits = self.inner.limits.current().await;
        let quote = self.inner.quotes.current().await;
        let points = self.inner.points.current().await;
        let phase = self.phase();
        let in_flight = self.inner.in_flight.load(Ordering::Acquire);

        let validation = validate_amount(
            &amount,
            limits.known(),
            config.token_decimals,
            &config.token_symbol,
        );
        let connected = account.is_some();

        SessionView {
            short_address: account.as_ref().map(short_address),
            connected,
            balance: balance
                .map(|b| b.to_display(config.token_decimals, BALANCE_DISPLAY_PLACES)),
            amount_error: validation.message().map(str::to_string),
            can_bridge: connected
                && validation.is_valid()
                && !limits.is_loading()
                && !in_flight,
            limits_loading: limits.is_loading(),
            limits: limits.known().cloned(),
            quote_loading: quote.loading,
            quote_output: quote.output_amount().map(|out| {
                format!(
                    "~{} {}",
                    out.to_fixed(config.token_decimals, QUOTE_DISPLAY_PLACES),
                    config.token_symbol
                )
            }),
            points,
            modal: ModalView::from_phase(
                &phase,
                &config.explorer_tx_base_url,
                config.points_per_bridge,
            ),
            phase,
            account,
            amount,
        }
    }

    fn set_phase(&self, phase: BridgePhase) {
        let previous = self.inner.phase.send_replace(phase);
        let current = self.inner.phase.borrow();
        if !previous.can_transition_to(&current) {
            tracing::debug!(?previous, current = ?*current, "Unexpected phase transition");
        }
    }

    fn try_begin(&self) -> Result<InFlightGuard> {
        self.inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BridgeError::InProgress)?;
        Ok(InFlightGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    async fn bridge_request(&self) -> Result<BridgeRequest> {
        let config = &self.inner.config;
        let form = self.inner.form.read().await;
        let account = form.account.ok_or(BridgeError::WalletNotConnected)?;
        let limits = self.inner.limits.current().await;

        match validate_amount(
            &form.amount,
            limits.known(),
            config.token_decimals,
            &config.token_symbol,
        ) {
            AmountValidation::Valid(amount) => Ok(BridgeRequest { account, amount }),
            AmountValidation::Invalid(e) => Err(BridgeError::InvalidAmount(e)),
            AmountValidation::OutOfRange { message, .. } => {
                Err(BridgeError::AmountOutOfRange(message))
            }
        }
    }

    /// Must be called holding the in-flight guard. Leaves a finished run's
    /// phase behind, and publishes `Failed` when the request is refused.
    async fn begin_request(&self) -> Result<BridgeRequest> {
        if self.phase().is_terminal() {
            self.set_phase(BridgePhase::Idle);
        }
        let request = self.bridge_request().await;
        if let Err(e) = &request {
            tracing::debug!("Bridge refused before start: {}", e);
            self.set_phase(BridgePhase::Failed {
                message: e.user_message(),
            });
        }
        request
    }

    fn spawn_guarded(&self, guard: InFlightGuard, request: BridgeRequest) {
        let session = self.clone();
        tokio::spawn(async move {
            // The outcome is already published as the terminal phase.
            let _ = session.run_guarded(guard, request).await;
        });
    }

    async fn run_guarded(&self, guard: InFlightGuard, request: BridgeRequest) -> Result<TxHash> {
        let result = self
            .inner
            .orchestrator
            .run(&request, |phase| self.set_phase(phase))
            .await;

        if result.is_ok() {
            self.inner.points.award_and_reconcile(&request.account).await;
            self.refresh_balance().await;
        }
        drop(guard);
        result
    }
}
