//! Server settings from environment variables (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/jobly";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Postgres schema holding the job-board tables.
    pub schema: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
            schema: DEFAULT_SCHEMA.into(),
        }
    }
}

impl AppConfig {
    /// `DATABASE_URL`, `BIND_ADDR`, `DATABASE_MAX_CONNECTIONS`, `REQUEST_BODY_LIMIT`, `JOBLY_SCHEMA`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = AppConfig::default();
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL").unwrap_or(d.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(d.bind_addr),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", d.max_connections)?,
            body_limit: parse_or(&lookup, "REQUEST_BODY_LIMIT", d.body_limit)?,
            schema: lookup("JOBLY_SCHEMA").unwrap_or(d.schema),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
