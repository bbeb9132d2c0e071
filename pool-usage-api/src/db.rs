use crate::config::{Config, PoolSettings, DATABASE_URL_VAR};
use crate::data_point::DataPoint;
use crate::error::{ConfigError, StartupError, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const SELECT_POOL_USAGE: &str =
    "SELECT id, timestamp, percentage FROM pool_usage ORDER BY timestamp";

/// Parses the connection string and builds a lazy pool. Nothing is sent to
/// the database here; connections are opened on first use.
pub fn init_pool(cfg: &Config) -> Result<PgPool, StartupError> {
    let options = PgConnectOptions::from_str(&cfg.database_url)
        .map_err(|e| ConfigError::Unparseable(DATABASE_URL_VAR, e))?;
    let pool = pool_options(&cfg.pool)?.connect_lazy_with(options);
    debug!(
        "Connection pool created: max_connections={}, min_connections={}",
        cfg.pool.max_connections, cfg.pool.min_connections
    );
    Ok(pool)
}

fn pool_options(settings: &PoolSettings) -> Result<PgPoolOptions, StartupError> {
    if settings.max_connections == 0 {
        return Err(StartupError::PoolInitialization(
            "max_connections must be at least 1".into(),
        ));
    }
    if settings.min_connections > settings.max_connections {
        return Err(StartupError::PoolInitialization(format!(
            "min_connections ({}) exceeds max_connections ({})",
            settings.min_connections, settings.max_connections
        )));
    }
    Ok(PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs)))
}

/// Read access to the usage readings.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// All readings in ascending timestamp order.
    async fn fetch_all(&self) -> Result<Vec<DataPoint>, StoreError>;
}

pub struct PgUsageStore {
    pool: PgPool,
}

impl PgUsageStore {
    pub fn new(pool: PgPool) -> Self {
        PgUsageStore { pool }
    }
}

#[async_trait]
impl UsageStore for PgUsageStore {
    async fn fetch_all(&self) -> Result<Vec<DataPoint>, StoreError> {
        // The connection goes back to the pool when `rows` is dropped,
        // including on early return.
        let mut rows = sqlx::query(SELECT_POOL_USAGE).fetch(&self.pool);
        let mut points = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(StoreError::Query)? {
            points.push(DataPoint::from_row(&row).map_err(StoreError::Decode)?);
        }
        debug!("Fetched {} data point(s)", points.len());
        Ok(points)
    }
}
