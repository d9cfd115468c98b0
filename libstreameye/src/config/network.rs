// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// The TCP listener configuration clients connect to.
#[derive(Clone, CopyGetters, Debug, Deserialize, Eq, PartialEq, Serialize, Setters)]
pub struct Network {
    /// Bind to `127.0.0.1` instead of `0.0.0.0`
    #[getset(get_copy = "pub", set = "pub")]
    listen_localhost: bool,
    /// TCP port clients connect to
    #[getset(get_copy = "pub", set = "pub")]
    port: u16,
    /// Per-client socket read timeout, in seconds
    #[getset(get_copy = "pub", set = "pub")]
    client_read_timeout_sec: u32,
}

impl Network {
    /// The address this configuration resolves to: `127.0.0.1` or `0.0.0.0`.
    #[must_use]
    pub fn bind_ip(&self) -> &'static str {
        if self.listen_localhost {
            "127.0.0.1"
        } else {
            "0.0.0.0"
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self {
            listen_localhost: false,
            port: 8080,
            client_read_timeout_sec: 10,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Network;

    #[test]
    fn bind_ip_defaults_to_all_interfaces() {
        let network = Network::default();
        assert_eq!(network.bind_ip(), "0.0.0.0");
    }

    #[test]
    fn bind_ip_honors_listen_localhost() {
        let mut network = Network::default();
        let _ = network.set_listen_localhost(true);
        assert_eq!(network.bind_ip(), "127.0.0.1");
    }
}
