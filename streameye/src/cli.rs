// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use clap::{ArgAction, Args, Parser};
use libstreameye::PathDefaults;
use serde::Serialize;

/// streameye: a one-to-many MJPEG fan-out server.
#[derive(Clone, Debug, Parser, Serialize)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increase the log level (may be repeated); `-dd` enables trace
    #[arg(short = 'd', long = "debug", action = ArgAction::Count)]
    verbose: u8,
    /// Decrease the log level (errors only)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,
    /// An optional path to a TOML configuration file
    #[arg(long = "config")]
    config: Option<String>,
    #[command(flatten)]
    #[serde(rename = "network")]
    network: NetworkArgs,
    #[command(flatten)]
    #[serde(rename = "segmenter")]
    segmenter: SegmenterArgs,
}

#[derive(Clone, Debug, Args, Serialize)]
pub(crate) struct NetworkArgs {
    /// Bind to 127.0.0.1 instead of 0.0.0.0
    #[arg(short = 'l', long = "localhost", action = ArgAction::SetTrue)]
    #[serde(skip_serializing_if = "Option::is_none")]
    listen_localhost: Option<bool>,
    /// TCP port clients connect to
    #[arg(short = 'p', long = "port")]
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    /// Per-client socket read timeout, in seconds
    #[arg(short = 't', long = "timeout")]
    #[serde(skip_serializing_if = "Option::is_none")]
    client_read_timeout_sec: Option<u32>,
}

#[derive(Clone, Debug, Args, Serialize)]
pub(crate) struct SegmenterArgs {
    /// An explicit input separator; default is auto-detect via FF D9 FF D8
    #[arg(short = 's', long = "separator")]
    #[serde(skip_serializing_if = "Option::is_none")]
    separator: Option<String>,
}

impl Cli {
    pub(crate) fn verbose(&self) -> u8 {
        self.verbose
    }

    pub(crate) fn quiet(&self) -> u8 {
        self.quiet
    }
}

impl PathDefaults for Cli {
    fn env_prefix(&self) -> String {
        "STREAMEYE".to_string()
    }

    fn config_absolute_path(&self) -> Option<String> {
        self.config.clone()
    }

    fn default_file_path(&self) -> String {
        "streameye".to_string()
    }

    fn default_file_name(&self) -> String {
        "streameye.toml".to_string()
    }

    fn tracing_absolute_path(&self) -> Option<String> {
        None
    }

    fn default_tracing_path(&self) -> String {
        "streameye".to_string()
    }

    fn default_tracing_file_name(&self) -> String {
        "streameye.log".to_string()
    }
}
