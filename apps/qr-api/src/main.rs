//! # SEPA QR API
//!
//! HTTP server rendering payment QR codes.
//!
//! ## Startup Order
//! ```text
//! load config ──► init tracing ──► build AppState ──► bind ──► serve
//!                                  (currency errors
//!                                   are logged here)
//! ```

use std::net::SocketAddr;

use sepa_qr_api::logging::init_tracing;
use sepa_qr_api::{AppState, ServiceConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::load()?;

    // Initialize tracing
    init_tracing(config.log_level, config.anonymize)?;

    info!("Starting SEPA QR API server...");

    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState::new(config);
    info!(
        allowed = ?state.currencies.allowed_currencies(),
        default = %state.currencies.default_currency(),
        "Currencies configured"
    );

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening on http://{addr}");

    axum::serve(listener, sepa_qr_api::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
