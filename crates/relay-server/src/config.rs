// ABOUTME: Configuration loading and validation for the relay server.
// ABOUTME: Reads RELAY_* environment variables; the binary layers CLI flags on top.

use std::net::SocketAddr;
use std::path::PathBuf;

use relay_store::DEFAULT_STORE_PATH;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RELAY_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("RELAY_ROUTE_PREFIX must start with '/' and must not end with '/': {0}")]
    InvalidPrefix(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub store_path: PathBuf,
    pub favicon_path: Option<PathBuf>,
    pub route_prefix: String,
}

/// Values given on the command line. Each one that is set replaces the
/// matching environment variable, which is then never read or validated.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub store_path: Option<PathBuf>,
    pub favicon_path: Option<PathBuf>,
    pub route_prefix: Option<String>,
}

impl RelayConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - RELAY_BIND: socket address to bind (default: 0.0.0.0:5000)
    /// - RELAY_STORE_PATH: file holding the latest record (default: /tmp/ma_alexa_api_store.json)
    /// - RELAY_FAVICON: favicon file to serve (default: favicon.ico next to the executable)
    /// - RELAY_ROUTE_PREFIX: path prefix for every route (default: empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(ConfigOverrides::default())
    }

    /// Like `from_env`, with command-line values taking precedence.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_str = overrides
            .bind
            .or_else(|| env("RELAY_BIND"))
            .unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let bind = parse_bind(&bind_str)?;

        let store_path = overrides
            .store_path
            .or_else(|| env("RELAY_STORE_PATH").filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let favicon_path = overrides
            .favicon_path
            .or_else(|| env("RELAY_FAVICON").filter(|p| !p.is_empty()).map(PathBuf::from))
            .or_else(default_favicon_path);

        let route_prefix = overrides
            .route_prefix
            .or_else(|| env("RELAY_ROUTE_PREFIX"))
            .unwrap_or_default();
        validate_prefix(&route_prefix)?;

        Ok(Self {
            bind,
            store_path,
            favicon_path,
            route_prefix,
        })
    }
}

/// Parse a bind address, reporting the raw input on failure.
pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidBind(value.to_string()))
}

/// An empty prefix mounts routes at the root. Anything else must look like `/ma`.
pub fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() || (prefix.starts_with('/') && !prefix.ends_with('/')) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrefix(prefix.to_string()))
    }
}

/// `favicon.ico` in the directory containing the running executable.
pub fn default_favicon_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("favicon.ico"))
}
