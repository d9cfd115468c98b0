// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The single-slot latest-frame rendezvous between the segmenter and every client
//! session, built on a `tokio::sync::watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::frame::JpegFrame;

/// The value carried by the `watch` channel: an epoch and the frame it identifies.
///
/// The slot is empty (epoch `0`, frame `None`) until the first frame is published.
#[derive(Clone, Debug, Default)]
struct Slot {
    epoch: u64,
    frame: Option<Arc<JpegFrame>>,
}

/// The producer side of the shared frame slot. Owned by the segmenter.
#[derive(Clone, Debug)]
pub struct SharedFrameSlot {
    sender: watch::Sender<Slot>,
}

impl SharedFrameSlot {
    /// Create a new, empty slot.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(Slot::default());
        Self { sender }
    }

    /// Publish a new frame: a lock-free pointer swap plus an epoch increment, never a
    /// copy of the frame bytes.
    pub fn publish(&self, frame: JpegFrame) {
        self.sender.send_modify(|slot| {
            slot.epoch += 1;
            slot.frame = Some(Arc::new(frame));
        });
    }

    /// Create a new subscriber observing this slot.
    #[must_use]
    pub fn subscribe(&self) -> FrameSubscriber {
        FrameSubscriber {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for SharedFrameSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The consumer side of the shared frame slot. Owned by one client session.
#[derive(Debug)]
pub struct FrameSubscriber {
    receiver: watch::Receiver<Slot>,
}

impl FrameSubscriber {
    /// Wait until a frame with an epoch greater than `last_seen_epoch` is available,
    /// then return it along with its epoch.
    ///
    /// If the producer has published more than once since `last_seen_epoch`, this
    /// jumps straight to the latest frame — the intermediate publishes are not
    /// individually observable.
    ///
    /// # Errors
    /// Returns `Err` if the producer side has been dropped, meaning no further frames
    /// will ever be published.
    pub async fn next(
        &mut self,
        last_seen_epoch: u64,
    ) -> Result<(Arc<JpegFrame>, u64), watch::error::RecvError> {
        loop {
            {
                let slot = self.receiver.borrow_and_update();
                if slot.epoch > last_seen_epoch {
                    if let Some(frame) = slot.frame.clone() {
                        return Ok((frame, slot.epoch));
                    }
                }
            }
            self.receiver.changed().await?;
        }
    }
}
