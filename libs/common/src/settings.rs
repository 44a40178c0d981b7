//! Per-service server settings
//!
//! Built-in defaults are layered under environment variables carrying the
//! service prefix, e.g. `AUTH_BIND_ADDRESS` or `API_LOG_LEVEL`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Settings shared by every service binary
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    pub bind_address: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory holding SQL migrations; migrations are skipped when unset
    pub migrations_dir: Option<PathBuf>,
}

impl ServiceSettings {
    /// Load settings for the service identified by `prefix`
    pub fn load(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", format!("0.0.0.0:{}", default_port))?
            .set_default("log_level", "info")?
            .add_source(Environment::with_prefix(prefix).prefix_separator("_"))
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Message(format!(
                "Invalid bind address {}: {}",
                self.bind_address, e
            ))
        })
    }
}
