//! Server configuration from environment variables.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_EVENT_BUFFER: usize = 256;
const DEFAULT_SERVICE_NAME: &str = "larder-server";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {name} '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Capacity of the reindex event channel
    pub event_buffer: usize,
    /// OTLP collector; console logging only when unset
    pub otel_endpoint: Option<String>,
    pub otel_service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|e: AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: bind_addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let event_buffer = match lookup("EVENT_BUFFER") {
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: "EVENT_BUFFER",
                        value,
                        reason: "must be at least 1".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "EVENT_BUFFER",
                        value,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_EVENT_BUFFER,
        };

        Ok(Self {
            database_url,
            bind_addr,
            event_buffer,
            otel_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            otel_service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        })
    }
}
