//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT (Ctrl+C) and, on unix, SIGTERM handlers
//! - Resolve when either arrives so startup can trigger shutdown

use std::io;

/// Wait for Ctrl+C or SIGTERM.
pub async fn wait_for_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
