use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
    /// Apply pending migrations at startup.
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |name: &'static str, default: &str, expected: &'static str| {
            let value = lookup(name).unwrap_or_else(|| default.to_string());
            Setting { name, value, expected }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse("PORT", "3030", "u16").get()?,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse("DB_MAX_CONNECTIONS", "20", "u32").get()?,
            db_min_connections: parse("DB_MIN_CONNECTIONS", "5", "u32").get()?,
            event_bus_capacity: parse("EVENT_BUS_CAPACITY", "1024", "usize").get()?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            run_migrations: parse("RUN_MIGRATIONS", "true", "boolean").flag()?,
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Setting {
    name: &'static str,
    value: String,
    expected: &'static str,
}

impl Setting {
    fn get<T: FromStr>(self) -> Result<T, ConfigError> {
        self.value.trim().parse().map_err(|_| self.invalid())
    }

    fn flag(self) -> Result<bool, ConfigError> {
        match self.value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(self.invalid()),
        }
    }

    fn invalid(&self) -> ConfigError {
        ConfigError::Invalid {
            name: self.name,
            expected: self.expected,
            value: self.value.clone(),
        }
    }
}
