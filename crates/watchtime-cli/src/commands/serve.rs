use color_eyre::eyre::Context;
use color_eyre::Result;
use tracing::info;
use watchtime_config::{Config, PathManager};

use crate::api::{self, AppState};

pub async fn run_serve(
    config: Config,
    path_manager: &PathManager,
    bind: Option<String>,
) -> Result<()> {
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let tracker = super::build_tracker(&config, path_manager)?;

    let state = AppState::new(tracker, config.client.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", bind_addr))?;

    info!(
        operation = "server_started",
        bind_addr = %bind_addr,
        provider = %config.provider.base_url,
        "WatchTime API listening on http://{}",
        bind_addr
    );

    axum::serve(listener, api::router(state, &config.server.allowed_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    info!(operation = "server_stopped", "WatchTime API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    info!(operation = "server_shutdown", "Shutdown signal received");
}
