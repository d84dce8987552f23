use std::{env, fmt, num::ParseIntError};

use thiserror::Error;
use tracing::{info, warn};

/// Listen port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;
/// `DATABASE_URL` scheme selecting the in-process store.
pub const MEMORY_SCHEME: &str = "memory://";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
}

/// Which store backend the configuration asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice<'a> {
    /// `DATABASE_URL` or `DATABASE_NAME` is missing: run without a store.
    Disabled,
    /// `DATABASE_URL` uses the `memory://` scheme.
    Memory,
    MongoDb { url: &'a str, database: &'a str },
}

/// Process configuration, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let database_url = var("DATABASE_URL");
        let database_name = var("DATABASE_NAME");

        for (key, value) in [("DATABASE_URL", &database_url), ("DATABASE_NAME", &database_name)] {
            if value.is_none() {
                warn!("Environment variable {key} not found, database disabled");
            }
        }

        Ok(Self {
            port,
            database_url,
            database_name,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn backend(&self) -> BackendChoice<'_> {
        match (self.database_url.as_deref(), self.database_name.as_deref()) {
            (Some(url), Some(_)) if url.starts_with(MEMORY_SCHEME) => BackendChoice::Memory,
            (Some(url), Some(database)) => BackendChoice::MongoDb { url, database },
            _ => BackendChoice::Disabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
        }
    }
}

// The connection string may carry credentials.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("database_name", &self.database_name)
            .finish()
    }
}
