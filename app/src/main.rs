use gho_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gho_bridge_lib::init_tracing()?;
    let config = AppConfig::from_env()?;
    gho_bridge_lib::run(config).await
}
