use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use spendlog::{
    api::{self, AppState},
    config::{CliArgs, Config},
    telemetry,
};
use spendlog_core::ExpenseStore;
use spendlog_memory::InMemoryExpenseStore;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    telemetry::init_logging(&config.logging);

    let store: Arc<dyn ExpenseStore> = Arc::new(InMemoryExpenseStore::with_id_generator(
        config.ids.strategy.generator(),
    ));

    let mut state = AppState::new(store);
    if config.metrics.enabled {
        state = state.with_metrics(telemetry::install_metrics()?);
    }

    let app = api::router(state, config.server.max_body_bytes);
    let addr = config.listen_addr().context("Invalid listen address")?;

    tracing::info!(%addr, ids = ?config.ids.strategy, "API listening");

    axum::Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind {}", addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
