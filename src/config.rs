use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::db::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_BIND_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub bind_port: u16,
    /// Return raw storage error text in failed-create responses.
    pub expose_store_errors: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must not be empty")]
    EmptyDatabaseUrl,
    #[error("DATABASE_MAX_CONNECTIONS must be a positive integer")]
    InvalidMaxConnections,
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("EXPOSE_STORE_ERRORS must be one of true, false, 1, 0, yes, no")]
    InvalidExposeStoreErrors,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = match lookup("DATABASE_URL") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDatabaseUrl),
            Some(value) => value.trim().to_string(),
            None => DEFAULT_DATABASE_URL.to_string(),
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .map(|value| {
                value
                    .parse::<u32>()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or(ConfigError::InvalidMaxConnections)
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_port = var("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(DEFAULT_BIND_PORT);

        let expose_store_errors = var("EXPOSE_STORE_ERRORS")
            .map(|value| parse_flag(&value).ok_or(ConfigError::InvalidExposeStoreErrors))
            .transpose()?
            .unwrap_or(false);

        let config = Self {
            database_url,
            max_connections,
            bind_addr,
            bind_port,
            expose_store_errors,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = parse(&[]).expect("config should parse");
        assert_eq!(config.database_url, "sqlite://app.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 5000);
        assert!(!config.expose_store_errors);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = parse(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("BIND_ADDR", "0.0.0.0"),
            ("BIND_PORT", "8080"),
            ("EXPOSE_STORE_ERRORS", "TRUE"),
        ])
        .expect("config should parse");

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(
            config.bind_socket().expect("socket"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid socket")
        );
        assert!(config.expose_store_errors);
    }

    #[test]
    fn empty_database_url_fails() {
        let err = parse(&[("DATABASE_URL", "  ")]).expect_err("expected empty url error");
        assert!(matches!(err, ConfigError::EmptyDatabaseUrl));
    }

    #[test]
    fn zero_max_connections_fails() {
        let err =
            parse(&[("DATABASE_MAX_CONNECTIONS", "0")]).expect_err("expected pool size error");
        assert!(matches!(err, ConfigError::InvalidMaxConnections));
    }

    #[test]
    fn invalid_port_fails() {
        let err = parse(&[("BIND_PORT", "70000")]).expect_err("expected port error");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn invalid_flag_fails() {
        let err = parse(&[("EXPOSE_STORE_ERRORS", "maybe")]).expect_err("expected flag error");
        assert!(matches!(err, ConfigError::InvalidExposeStoreErrors));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = parse(&[("BIND_ADDR", "not an address")]).expect_err("expected socket error");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }
}
