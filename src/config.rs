use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use clap::Args;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--port must be > 0")]
    InvalidPort,
    #[error("--host must be an IP address, got {0:?}")]
    InvalidHost(String),
    #[error("--cors-origins contains an invalid origin: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "PENSION_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PENSION_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allowed CORS origins, comma-separated. Any origin is allowed when empty.
    #[arg(long, env = "PENSION_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        self.socket_addr()?;
        self.cors_origin_values()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured origins as header values; empty means any origin. A `*`
    /// entry also means any origin.
    pub fn cors_origin_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        let origins: Vec<&str> = self
            .cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .collect();
        if origins.contains(&"*") {
            return Ok(Vec::new());
        }
        origins
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect()
    }
}
