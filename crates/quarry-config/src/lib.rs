pub mod config;
pub mod error;

pub use config::{generate_default_config, set_config_path, Config, Paths, CONFIG_PATH};
pub use error::{ConfigError, Result};

#[cfg(test)]
pub mod test_utils;
