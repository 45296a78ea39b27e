//! # Cross-platform termination signal handling.
//!
//! Provides [`wait_for_shutdown_signal`], an async helper that completes
//! when the process is asked to stop. This is the interactive-context
//! trigger for the disconnect request, the counterpart of a front-end's
//! quit action.
//!
//! Unix listens for SIGTERM and SIGQUIT in addition to Ctrl-C; elsewhere
//! only Ctrl-C is available.

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners. Returns `Err` only if
/// signal registration itself fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
        _ = sigquit.recv() => {}
    }
    Ok(())
}

/// Waits for a termination signal (Ctrl-C).
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
