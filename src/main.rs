use anyhow::Context;
use chaos_probe::config::Config;
use chaos_probe::server::{
    run_probe_server, shutdown_channel, wait_for_signal, AppState, FreezeState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    let addr = config.socket_addr();
    info!(addr = %addr, "Starting chaos-probe");

    let (shutdown_controller, shutdown_signal) = shutdown_channel();

    // Unfrozen until the first POST /freeze
    let state = AppState::new(FreezeState::new());

    tokio::spawn(async move {
        let signal = wait_for_signal().await;
        info!(signal = signal, "Initiating graceful shutdown");
        shutdown_controller.shutdown();
    });

    run_probe_server(addr, state, shutdown_signal)
        .await
        .with_context(|| format!("probe server on {} failed", addr))?;

    info!("chaos-probe shut down gracefully");
    Ok(())
}
