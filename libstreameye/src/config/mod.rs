// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Configuration loading: defaults < TOML file < environment < CLI flags.

pub mod network;
pub mod segmenter;
pub mod tracing;

use anyhow::{Context as _, Result};
use config::{Config as Figment, Environment, File};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Error;

pub use network::Network;
pub use segmenter::Segmenter;
pub use tracing::Tracing;

/// Describes the default paths and env prefix used when loading configuration and
/// initializing tracing. Implemented by the binary's CLI type.
pub trait PathDefaults {
    /// Environment variable prefix, e.g. `STREAMEYE`.
    fn env_prefix(&self) -> String;
    /// An explicit config file path override, if one was supplied on the CLI.
    fn config_absolute_path(&self) -> Option<String>;
    /// The directory (relative to the OS config dir) the default config file lives in.
    fn default_file_path(&self) -> String;
    /// The default config file name.
    fn default_file_name(&self) -> String;
    /// An explicit tracing log file path override, if one was supplied on the CLI.
    fn tracing_absolute_path(&self) -> Option<String>;
    /// The directory (relative to the OS data dir) the default log file lives in.
    fn default_tracing_path(&self) -> String;
    /// The default log file name (without extension).
    fn default_tracing_file_name(&self) -> String;
}

/// Load a `T` by layering defaults, an optional TOML file, environment variables
/// prefixed with `defaults.env_prefix()`, and finally the CLI overrides in `cli`.
///
/// Each layer takes precedence over the previous one.
///
/// # Errors
/// * The config directory cannot be resolved when no explicit path was given.
/// * The layered configuration fails to build or deserialize into `T`.
///
pub fn load<C, T, D>(cli: &C, defaults: &D) -> Result<T>
where
    C: Serialize,
    T: DeserializeOwned + Default + Serialize,
    D: PathDefaults,
{
    let default_path = config_absolute_path(defaults)?;

    let builder = Figment::builder()
        .add_source(
            Figment::try_from(&T::default()).with_context(|| Error::ConfigBuild)?,
        )
        .add_source(File::from(default_path).required(false))
        .add_source(Environment::with_prefix(&defaults.env_prefix()).separator("__"))
        .add_source(Figment::try_from(cli).with_context(|| Error::ConfigBuild)?);

    builder
        .build()
        .with_context(|| Error::ConfigLoad)?
        .try_deserialize()
        .with_context(|| Error::ConfigDeserialize)
}

fn config_absolute_path<D>(defaults: &D) -> Result<std::path::PathBuf>
where
    D: PathDefaults,
{
    use crate::utils::to_path_buf;

    defaults
        .config_absolute_path()
        .as_ref()
        .map_or_else(|| default_config_absolute_path(defaults), to_path_buf)
}

fn default_config_absolute_path<D>(defaults: &D) -> Result<std::path::PathBuf>
where
    D: PathDefaults,
{
    let mut path = dirs2::config_dir().ok_or(Error::ConfigDir)?;
    path.push(defaults.default_file_path());
    path.push(defaults.default_file_name());
    Ok(path)
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use super::{PathDefaults, load};

    #[derive(Debug, Default, Deserialize, Serialize)]
    struct TestTarget {
        #[serde(default)]
        value: u32,
    }

    #[derive(Serialize)]
    struct TestCli {
        value: u32,
    }

    struct TestDefaults;

    impl PathDefaults for TestDefaults {
        fn env_prefix(&self) -> String {
            "STREAMEYE_TEST".to_string()
        }

        fn config_absolute_path(&self) -> Option<String> {
            Some("/nonexistent/streameye-test.toml".to_string())
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
            "streameye".to_string()
        }
    }

    #[test]
    fn cli_overrides_default_when_file_is_absent() {
        let cli = TestCli { value: 7 };
        let loaded: TestTarget = load(&cli, &TestDefaults).unwrap();
        assert_eq!(loaded.value, 7);
    }
}
