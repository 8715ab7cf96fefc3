//! PDF Janitor daemon
//!
//! Runs the periodic artifact sweep as a standalone process until it
//! receives Ctrl+C or SIGTERM.

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_janitor::{Config, PdfJanitor};

/// Main entry point for the janitor daemon.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the janitor for the configured directory and TTL
/// 4. Start the periodic sweep task
/// 5. Wait for a shutdown signal, stop the task, report the final counts
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_janitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PDF janitor");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: pdf_dir={}, ttl={}m, sweep_interval={}s",
        config.pdf_dir.display(),
        config.ttl_minutes,
        config.sweep_interval_secs
    );

    let janitor = PdfJanitor::from_config(&config);
    janitor.start(config.sweep_interval()).await?;

    shutdown_signal().await;

    // Blocks until the sweep loop has fully terminated
    janitor.stop().await;

    let status = janitor.status().await;
    info!(
        "Shutdown complete: {} sweeps run, {} artifacts removed",
        status.stats.sweeps_completed, status.stats.files_removed
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
