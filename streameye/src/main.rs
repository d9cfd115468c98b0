// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

mod acceptor;
mod cli;
mod config;
mod lifecycle;
mod runtime;
mod session;

use libstreameye::{clap_or_error, success};
use vergen_pretty::{PrettyBuilder, vergen_pretty_env};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(e) = print_build_info() {
        eprintln!("failed to print build info: {e:?}");
    }

    let code = runtime::run::<Vec<String>, String>(None)
        .await
        .map_or_else(clap_or_error, success);
    std::process::ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn print_build_info() -> anyhow::Result<()> {
    PrettyBuilder::default()
        .env(vergen_pretty_env!())
        .build()?
        .display(&mut std::io::stdout())?;
    Ok(())
}
