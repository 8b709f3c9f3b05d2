//! Process configuration.
//!
//! [`ServerSettings`] is layered by OrthoConfig from CLI flags, `PRESSROOM_*`
//! environment variables and an optional config file. Token settings live in
//! [`token`] and are read straight from the environment because the secret is
//! mandatory and must never pass through a config file.

pub mod token;

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub use token::{BuildMode, TokenConfigError, secret_fingerprint, token_settings_from_env};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A pool of zero connections cannot serve requests.
    #[error("pool max size must be positive")]
    PoolSize,
}

/// Server settings loaded via OrthoConfig.
///
/// Without a `database_url` the server falls back to the in-process store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRESSROOM")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Parsed bind address.
    ///
    /// # Examples
    /// ```
    /// use pressroom::settings::ServerSettings;
    ///
    /// let settings = ServerSettings {
    ///     bind_addr: "127.0.0.1:8080".to_owned(),
    ///     database_url: None,
    ///     pool_max_size: None,
    /// };
    /// assert_eq!(settings.bind_addr().unwrap().port(), 8080);
    /// ```
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.trim();
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to 10.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::PoolSize),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_MAX_SIZE),
        }
    }
}
