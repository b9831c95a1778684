//! Structured logging and the Prometheus recorder.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    tracing::info!(level = %config.level, json = config.json, "Logging initialized");
}

pub fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!("spendlog_expenses_created_total", "Expenses accepted and stored");
    metrics::describe_counter!("spendlog_expenses_rejected_total", "Create requests rejected as invalid, by reason");
    metrics::describe_counter!("spendlog_requests_method_not_allowed_total", "Requests using an unsupported method");
    metrics::describe_gauge!("spendlog_expenses_stored", "Expenses currently held in memory");

    Ok(handle)
}
