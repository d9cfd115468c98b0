// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! One client session: write the HTTP preamble, then stream multipart parts until the
//! socket fails, the client goes quiet past its read timeout, or shutdown is signaled.

use std::{net::SocketAddr, time::Duration};

use libstreameye::{
    SharedFrameSlot,
    protocol::{part, preamble},
};
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::TcpStream,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Run one client session to completion. The caller holds this session's
/// `RegistrationGuard` for the duration of the returned future so the registry stays
/// consistent even if the task panics.
pub(crate) async fn run(
    id: Uuid,
    peer: SocketAddr,
    stream: TcpStream,
    slot: SharedFrameSlot,
    token: CancellationToken,
    read_timeout: Duration,
) {
    if let Err(e) = stream.set_nodelay(true) {
        warn!(%id, %peer, "failed to set TCP_NODELAY: {e}");
    }

    let (mut read_half, mut write_half) = stream.into_split();

    if let Err(e) = write_half.write_all(&preamble()).await {
        debug!(%id, %peer, "failed to write greeting: {e}");
        return;
    }

    let mut subscriber = slot.subscribe();
    let mut last_seen_epoch = 0u64;
    let mut discard = [0u8; 1024];

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!(%id, %peer, "shutting down client session");
                break;
            }
            read_result = tokio::time::timeout(read_timeout, read_half.read(&mut discard)) => {
                match read_result {
                    Ok(Ok(0)) => {
                        debug!(%id, %peer, "client closed connection");
                        break;
                    }
                    Ok(Ok(_)) => {
                        // Client request bytes are drained and ignored; we never parse them.
                    }
                    Ok(Err(e)) => {
                        debug!(%id, %peer, "read error: {e}");
                        break;
                    }
                    Err(_elapsed) => {
                        debug!(%id, %peer, "client read timed out, tearing down session");
                        break;
                    }
                }
            }
            frame_result = subscriber.next(last_seen_epoch) => {
                match frame_result {
                    Ok((frame, epoch)) => {
                        if let Err(e) = write_half.write_all(&part(frame.as_bytes())).await {
                            debug!(%id, %peer, "write error: {e}");
                            break;
                        }
                        last_seen_epoch = epoch;
                    }
                    Err(_) => {
                        info!(%id, %peer, "frame slot closed, ending session");
                        break;
                    }
                }
            }
        }
    }

    let _ = write_half.shutdown().await;
}
