// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::{ffi::OsString, time::Duration};

use anyhow::{Context as _, Result};
use clap::Parser as _;
use libstreameye::{ClientRegistry, Segmenter, SharedFrameSlot, StreamEyeError, init_tracing, load};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, trace};

use crate::{acceptor, cli::Cli, config::Config, lifecycle};

/// Parse the command line, load configuration, initialize tracing, and run the server
/// until a shutdown signal (or stdin EOF) is observed.
pub(crate) async fn run<I, T>(args: Option<I>) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = if let Some(args) = args {
        Cli::try_parse_from(args)?
    } else {
        Cli::try_parse()?
    };

    let mut config =
        load::<Cli, Config, Cli>(&cli, &cli).with_context(|| StreamEyeError::ConfigLoad)?;
    let _ = config.set_enable_std_output(config.quiet() == 0);

    init_tracing(&config, config.tracing().file(), &cli, None)
        .with_context(|| StreamEyeError::TracingInit)?;

    trace!("configuration loaded");
    trace!("tracing initialized");

    let slot = SharedFrameSlot::new();
    let registry = ClientRegistry::new();
    let root_token = CancellationToken::new();

    let read_timeout = Duration::from_secs(u64::from(config.network().client_read_timeout_sec()));
    let bind_ip = config.network().bind_ip();
    let port = config.network().port();

    let segmenter_slot = slot.clone();
    let segmenter_config = config.segmenter().clone();
    let segmenter_token = root_token.clone();
    let mut segmenter_handle = tokio::spawn(async move {
        run_segmenter(segmenter_slot, segmenter_config, segmenter_token).await;
    });

    let acceptor_slot = slot.clone();
    let acceptor_registry = registry.clone();
    let acceptor_token = root_token.clone();
    let acceptor_handle = tokio::spawn(async move {
        acceptor::run(
            (bind_ip, port),
            acceptor_slot,
            acceptor_registry,
            acceptor_token,
            read_timeout,
        )
        .await
    });

    tokio::select! {
        () = lifecycle::wait_for_shutdown(root_token.clone()) => {}
        _ = &mut segmenter_handle => {
            info!("input stream ended, shutting down");
            root_token.cancel();
        }
    }

    if !segmenter_handle.is_finished() {
        let _ = segmenter_handle.await;
    }

    match acceptor_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("acceptor exited with error: {e}"),
        Err(e) => error!("acceptor task panicked: {e}"),
    }

    info!("shutdown complete");
    Ok(())
}

async fn run_segmenter(
    slot: SharedFrameSlot,
    config: libstreameye::SegmenterConfig,
    token: CancellationToken,
) {
    let stdin = tokio::io::stdin();
    let mut segmenter = Segmenter::new(stdin, config);

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            frame = segmenter.next_frame() => {
                match frame {
                    Ok(Some(frame)) => slot.publish(frame),
                    Ok(None) => {
                        info!("stdin closed (EOF)");
                        break;
                    }
                    Err(e) => {
                        error!("stdin read error: {e}");
                        break;
                    }
                }
            }
        }
    }
}
