use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings read from the process environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080)?;
        let pool_size = parse_or("DATABASE_POOL_SIZE", lookup("DATABASE_POOL_SIZE"), 10)?;

        Ok(Self {
            database_url,
            host,
            port,
            pool_size,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
