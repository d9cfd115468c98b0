// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Serialize};

/// The default accumulator capacity: 2 MiB.
pub const DEFAULT_JPEG_BUF_LEN: usize = 2 * 1024 * 1024;
/// The default stdin read chunk size: 32 KiB.
pub const DEFAULT_INPUT_BUF_LEN: usize = 32 * 1024;
/// The auto-detect separator: EOI immediately followed by SOI.
pub const AUTO_SEPARATOR: [u8; 4] = [0xFF, 0xD9, 0xFF, 0xD8];

/// Configuration for the frame segmenter.
#[derive(Clone, CopyGetters, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, Setters)]
pub struct Segmenter {
    /// An explicit separator byte string. When absent, the segmenter auto-detects
    /// using [`AUTO_SEPARATOR`].
    #[getset(get = "pub", set = "pub")]
    separator: Option<String>,
    /// Accumulator capacity. A single read that would push accumulation past this
    /// bound causes the entire accumulator to be discarded.
    #[getset(get_copy = "pub", set = "pub")]
    jpeg_buf_len: usize,
    /// Size of each stdin read.
    #[getset(get_copy = "pub", set = "pub")]
    input_buf_len: usize,
}

impl Segmenter {
    /// Raw separator bytes to search for: either the configured explicit separator,
    /// or [`AUTO_SEPARATOR`] when none was configured.
    #[must_use]
    pub fn separator_bytes(&self) -> Vec<u8> {
        self.separator
            .as_ref()
            .map_or_else(|| AUTO_SEPARATOR.to_vec(), |sep| sep.clone().into_bytes())
    }

    /// True when an explicit separator shorter than 4 bytes was configured — such a
    /// separator may collide with frame data.
    #[must_use]
    pub fn short_separator_warning(&self) -> bool {
        self.separator.as_ref().is_some_and(|sep| sep.len() < 4)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            separator: None,
            jpeg_buf_len: DEFAULT_JPEG_BUF_LEN,
            input_buf_len: DEFAULT_INPUT_BUF_LEN,
        }
    }
}
