//! bridge-widget: GHO Ethereum → Lens bridge widget core
//!
//! Everything the bridge card does, without a UI:
//! - Debounced output quotes and deposit-limit lookups against Across
//! - Amount validation against those limits
//! - The approval → swap → confirmation state machine
//! - The off-chain points counter and its two-phase update
//! - Modal presentation derived from the bridge phase
//!
//! [`BridgeSession`] ties the pieces together into one store.

pub mod constants;
pub mod error;
pub mod limits;
pub mod modal;
pub mod orchestrator;
pub mod points;
pub mod quote;
pub mod services;
pub mod session;
pub mod state;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BridgeError, Result};
pub use limits::{LimitsFetcher, LimitsState};
pub use modal::ModalView;
pub use orchestrator::{BridgeOrchestrator, BridgeRequest};
pub use points::{PointsDisplay, PointsLedger};
pub use quote::{QuoteFetcher, QuoteState};
pub use services::{BridgeApi, PointsApi, Wallet};
pub use session::{BridgeSession, SessionView};
pub use state::{BridgePhase, PrepareStep};
pub use validate::{validate_amount, AmountValidation};
