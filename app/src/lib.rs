//! GHO bridge widget service library

pub mod phase_watcher;

use std::sync::Arc;
use std::time::Duration;

use across_client::AcrossClient;
use anyhow::Context;
use bridge_widget::BridgeSession;
use gho_core::AppConfig;
use points_client::PointsClient;
use wallet_rpc::RpcWallet;
use widget_api::ApiState;

/// Install the global tracing subscriber. `RUST_LOG` adds to the defaults.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gho_bridge=debug".parse()?)
                .add_directive("bridge_widget=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();
    Ok(())
}

/// Wire the clients into a bridge session
pub fn build_session(config: &AppConfig) -> anyhow::Result<BridgeSession> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let across = AcrossClient::new(config.across.clone(), timeout)
        .context("Failed to create bridge API client")?;
    let wallet = RpcWallet::new(&config.wallet).context("Failed to create wallet client")?;
    let points =
        PointsClient::new(&config.points, timeout).context("Failed to create points client")?;

    Ok(BridgeSession::new(
        config.widget.clone(),
        Arc::new(across),
        Arc::new(wallet),
        Arc::new(points),
    ))
}

/// Run the widget service until the server stops
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        across = %config.across.base_url,
        wallet = %config.wallet.rpc_url,
        "Starting GHO bridge widget"
    );

    let session = build_session(&config)?;
    let _watcher = phase_watcher::spawn(&session);

    widget_api::start_server(ApiState::new(session), config.api_port)
        .await
        .with_context(|| format!("API server on port {} failed", config.api_port))
}
