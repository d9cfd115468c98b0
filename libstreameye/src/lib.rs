// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Core types for a one-to-many MJPEG fan-out server: a frame segmenter, a
//! single-producer/multi-consumer shared frame slot, a client registry, the HTTP
//! streaming protocol, and the ambient configuration/tracing/error stack around them.

pub mod config;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod registry;
pub mod segmenter;
pub mod slot;
pub mod tracing;
pub mod utils;

pub use config::{Network, PathDefaults, Segmenter as SegmenterConfig, Tracing, load};
pub use error::{Error as StreamEyeError, clap_or_error, success};
pub use frame::JpegFrame;
pub use registry::{ClientRegistry, RegistrationGuard, SessionHandle};
pub use segmenter::Segmenter;
pub use slot::{FrameSubscriber, SharedFrameSlot};
pub use tracing::{TracingConfigExt, init_tracing};
