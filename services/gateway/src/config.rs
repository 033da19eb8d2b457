use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "CVSS_BIND_ADDR";
pub const SCORING_DATA_VAR: &str = "CVSS_SCORING_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CVSS_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Gateway settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// JSON file with the lookup and max-severity tables
    pub scoring_data: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            scoring_data: None,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset or empty keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(BIND_ADDR_VAR) {
            let parsed = value.trim().parse::<SocketAddr>();
            config.bind_addr =
                parsed.map_err(|source| ConfigError::InvalidBindAddr { value, source })?;
        }
        config.scoring_data = read(SCORING_DATA_VAR).map(PathBuf::from);

        Ok(config)
    }
}
