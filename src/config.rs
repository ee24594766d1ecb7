use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR '{value}': {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Loads `.env` (if present), then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| {
            tracing::warn!("BIND_ADDR not set, using default");
            DEFAULT_BIND_ADDR.to_string()
        });
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn unparsable_bind_addr_is_rejected() {
        let err = Config::from_lookup(lookup_in(&[("BIND_ADDR", "not-an-address")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidBindAddr { ref value, .. } if value == "not-an-address"));
    }
}
