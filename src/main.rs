use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use keel_stone_pathfinder::api::{AppState, api_routes};
use keel_stone_pathfinder::config::ServerConfig;
use keel_stone_pathfinder::error::ConfigError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Failed to read configuration")?;

    // Held for the process lifetime so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config)?;

    eprintln!("⚓ Keel Stone Pathfinder v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api", config.socket_addr());
    eprintln!(
        "   Storage: {}",
        config
            .db_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-memory".to_string())
    );
    eprintln!(
        "   Multi-agent templating: {}\n",
        if config.plan.multi_agent { "enabled" } else { "disabled" }
    );

    let state = AppState::from_config(&config)
        .await
        .context("Failed to open store")?;
    let app = api_routes(state);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;
    tracing::info!(addr = %config.socket_addr(), "Pathfinder API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Pathfinder API stopped");
    Ok(())
}

/// Stderr logging, plus a daily-rolling file when a log directory is set.
fn init_tracing(
    config: &ServerConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "pathfinder.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .init();
            Ok(None)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
