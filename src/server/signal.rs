use std::future::pending;

use tokio::signal;
use tracing::{error, info};

/// Resolves on the first SIGINT (Ctrl+C) or SIGTERM.
///
/// On non-Unix platforms only Ctrl+C is observed. A handler that cannot be
/// installed is logged and never resolves, leaving the other one in charge.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {error}");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                error!("Failed to install SIGTERM handler: {error}");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM")
    }
}
