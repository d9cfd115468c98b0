// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Carves a byte stream into discrete JPEG frames.
//!
//! Generic over `AsyncRead` so tests can drive it with an in-memory cursor while
//! production code drives it with `tokio::io::stdin()`.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{error, warn};

use crate::{config::Segmenter as SegmenterConfig, frame::JpegFrame};

/// Reads a byte stream and emits complete JPEG frames.
pub struct Segmenter<R> {
    reader: R,
    config: SegmenterConfig,
    accumulator: Vec<u8>,
}

impl<R> Segmenter<R>
where
    R: AsyncRead + Unpin,
{
    /// Build a segmenter over `reader` using `config` for buffer sizes and separator.
    #[must_use]
    pub fn new(reader: R, config: SegmenterConfig) -> Self {
        if config.short_separator_warning() {
            warn!("configured separator is shorter than 4 bytes, it may collide with frame data");
        }
        Self {
            reader,
            config,
            accumulator: Vec::with_capacity(config.input_buf_len()),
        }
    }

    /// Read the next complete frame, reading and accumulating more input as needed.
    ///
    /// Returns `Ok(None)` on clean EOF. Oversized accumulations are discarded
    /// internally (logged) and the read loop continues rather than returning an error.
    pub async fn next_frame(&mut self) -> std::io::Result<Option<JpegFrame>> {
        loop {
            if let Some(frame) = self.try_extract_frame() {
                return Ok(Some(frame));
            }

            let mut chunk = vec![0u8; self.config.input_buf_len()];
            let read = self.reader.read(&mut chunk).await?;
            if read == 0 {
                return Ok(None);
            }
            chunk.truncate(read);

            let threshold = self.config.jpeg_buf_len() + self.boundary_overhead();
            if self.accumulator.len() + chunk.len() >= threshold {
                error!("oversized frame, discarding accumulator");
                self.accumulator.clear();
                continue;
            }

            self.accumulator.extend_from_slice(&chunk);
        }
    }

    /// Bytes of the separator that lie beyond the frame they terminate, and so must
    /// accumulate in addition to the frame's own content before a boundary of exactly
    /// `jpeg_buf_len` content bytes can even be detected.
    ///
    /// Auto mode folds the separator's first two bytes (the frame's own trailing EOI)
    /// into the frame, so only the next frame's leading SOI is "extra". Explicit mode
    /// folds none of the separator into the frame, so the whole separator is extra.
    fn boundary_overhead(&self) -> usize {
        let separator_len = self.config.separator_bytes().len();
        let included_in_frame = if self.config.separator().is_none() { 2 } else { 0 };
        separator_len.saturating_sub(included_in_frame)
    }

    fn try_extract_frame(&mut self) -> Option<JpegFrame> {
        let separator = self.config.separator_bytes();
        if separator.is_empty() || self.accumulator.len() < separator.len() {
            return None;
        }

        let window_start = self
            .accumulator
            .len()
            .saturating_sub(2 * self.config.input_buf_len());
        let haystack = &self.accumulator[window_start..];

        let hit = find_subslice(haystack, &separator)?;
        let absolute_hit = window_start + hit;

        let is_auto = self.config.separator().is_none();
        let (frame_end, remainder_start) = if is_auto {
            (absolute_hit + 2, absolute_hit + 2)
        } else {
            (absolute_hit, absolute_hit + separator.len())
        };

        let frame_bytes = self.accumulator[..frame_end].to_vec();
        self.accumulator.drain(..remainder_start);

        Some(JpegFrame::new(frame_bytes))
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
