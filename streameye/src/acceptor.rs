// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Accepts incoming TCP connections and spawns one client session task per accept.

use std::time::Duration;

use anyhow::{Context as _, Result};
use libstreameye::{ClientRegistry, SharedFrameSlot, StreamEyeError};
use tokio::{net::TcpListener, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::session;

/// Bind `addr`, accept connections until `token` is cancelled, and join every
/// outstanding session task before returning so the caller can be sure no task is
/// leaked across shutdown.
pub(crate) async fn run(
    addr: (&str, u16),
    slot: SharedFrameSlot,
    registry: ClientRegistry,
    token: CancellationToken,
    read_timeout: Duration,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| StreamEyeError::Bind)?;
    info!("listening on {}:{}", addr.0, addr.1);

    let mut sessions = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!("acceptor shutting down, no longer accepting connections");
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer)) => {
                        let id = Uuid::new_v4();
                        info!(%id, %peer, "accepted connection");
                        let guard = registry.register(id, peer).await;
                        let slot = slot.clone();
                        let session_token = token.child_token();
                        sessions.spawn(async move {
                            session::run(id, peer, stream, slot, session_token, read_timeout).await;
                            drop(guard);
                        });
                    }
                    Err(e) => {
                        error!("accept error: {e}");
                    }
                }
            }
        }
    }

    while sessions.join_next().await.is_some() {}

    Ok(())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use libstreameye::{ClientRegistry, SharedFrameSlot};
    use tokio::net::TcpStream;
    use tokio_util::sync::CancellationToken;

    use super::run;

    #[tokio::test]
    async fn shutdown_joins_every_session_task_before_returning() {
        let slot = SharedFrameSlot::new();
        let registry = ClientRegistry::new();
        let token = CancellationToken::new();

        let run_token = token.clone();
        let handle = tokio::spawn(run(
            ("127.0.0.1", 0),
            slot,
            registry.clone(),
            run_token,
            Duration::from_secs(5),
        ));

        // `run` binds an ephemeral port internally, so there's no address to connect
        // to from here; this exercises that the acceptor returns promptly and cleanly
        // when cancelled before any client ever connects.
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("acceptor should exit after cancellation")
            .unwrap()
            .unwrap();
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn registered_sessions_are_deregistered_after_shutdown() {
        let slot = SharedFrameSlot::new();
        let registry = ClientRegistry::new();
        let token = CancellationToken::new();

        // Bind directly so the test can learn the ephemeral port before `run` takes
        // ownership of the listener.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let run_token = token.clone();
        let run_registry = registry.clone();
        let handle = tokio::spawn(run(
            ("127.0.0.1", addr.port()),
            slot,
            run_registry,
            run_token,
            Duration::from_secs(5),
        ));

        // Give the acceptor a moment to rebind the now-free port.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _client = TcpStream::connect(addr).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(registry.len().await, 1);

        token.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("acceptor should exit after cancellation")
            .unwrap()
            .unwrap();

        // Dropping the acceptor's session task deregisters via `RegistrationGuard`.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(registry.len().await, 0);
    }
}
