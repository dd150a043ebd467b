//! Startup configuration read from environment variables
//!
//! - `PROBE_HOST` - IP address to bind (default `0.0.0.0`)
//! - `PROBE_PORT` - TCP port to bind (default `8000`)
//!
//! Log filtering is handled separately through `RUST_LOG`.

use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use thiserror::Error;

/// Env var holding the bind address
pub const HOST_ENV: &str = "PROBE_HOST";

/// Env var holding the bind port
pub const PORT_ENV: &str = "PROBE_PORT";

/// Default port for the probe endpoints
pub const DEFAULT_PORT: u16 = 8000;

/// Errors raised while parsing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PROBE_HOST value '{value}': {source}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid PROBE_PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Missing and empty values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = match get(HOST_ENV) {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { value, source })?,
            None => defaults.host,
        };

        let port = match get(PORT_ENV) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
