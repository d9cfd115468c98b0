// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Wires OS shutdown signals to the root `CancellationToken`.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Wait for `SIGINT`/`SIGTERM` (or just `ctrl_c` on non-Unix targets), then cancel
/// `token`. A second signal arriving after shutdown has already begun is logged once
/// and otherwise ignored — cancelling an already-cancelled token is a no-op.
pub(crate) async fn wait_for_shutdown(token: CancellationToken) {
    wait_for_signal().await;
    info!("shutdown signal received, cancelling all tasks");
    token.cancel();

    wait_for_signal().await;
    info!("second shutdown signal received, shutdown already in progress");
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(_) => {
            // No SIGTERM handler available; fall back to ctrl_c alone.
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
