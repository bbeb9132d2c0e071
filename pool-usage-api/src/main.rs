mod config;
mod data_point;
mod db;
mod error;
mod pool_data;
mod state;

use anyhow::Context;
use config::Config;
use error::{ConfigError, StartupError};
use state::AppState;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    run(Config::from_env).await
}

/// Loads config, builds the pool, then serves until the server stops.
/// Startup failures return before anything is bound.
async fn run<F>(load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<Config, ConfigError>,
{
    let cfg = load_config()
        .map_err(StartupError::from)
        .context("Error initializing database connection")?;
    let pool = db::init_pool(&cfg).context("Error initializing database connection")?;

    let addr: SocketAddr = cfg.listen.parse()?;
    let state = Arc::new(AppState::from_pool(pool.clone()));
    let app = pool_data::router(state);

    let result = match axum::Server::try_bind(&addr) {
        Ok(builder) => {
            info!(%addr, "Starting pool-usage-api");
            builder.serve(app.into_make_service()).await
        }
        Err(e) => Err(e),
    };

    pool.close().await;
    result.context("Failed to start server")
}
