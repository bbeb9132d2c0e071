use crate::error::ConfigError;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    // How long a request waits for a free connection before the query fails.
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    // Only the connection string comes from the environment; the listen
    // address and pool settings are fixed defaults for now.
    pub listen: String,
    pub pool: PoolSettings,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Config {
            database_url: database_url.into(),
            listen: DEFAULT_LISTEN.to_string(),
            pool: PoolSettings::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        Ok(Config::new(url))
    }
}
