//! `relaychat serve`: run the relay HTTP server until Ctrl+C or SIGTERM.

use anyhow::Context;
use console::style;
use tracing::{error, info};

use relaychat_types::config::RelaychatConfig;

use crate::http::router::build_router;
use crate::state::AppState;

/// Bind, serve, and shut down cleanly.
pub async fn serve(config: &RelaychatConfig) -> anyhow::Result<()> {
    let state = AppState::init(config).await?;
    let db_pool = state.db_pool.clone();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!();
    println!(
        "  {} relaychat listening on {}",
        style("⚡").bold(),
        style(format!("http://{addr}/api")).cyan()
    );
    println!(
        "  {} {}",
        style("Model:").dim(),
        style(&config.gemini.model).bold()
    );
    println!("  {}", style("Press Ctrl+C to stop").dim());
    info!(%addr, "Relay server started");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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
    info!("Shutdown signal received");
}
