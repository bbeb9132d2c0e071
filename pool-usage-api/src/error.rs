use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("unable to parse {0}: {1}")]
    Unparseable(&'static str, #[source] sqlx::Error),
}

/// Failures that stop the process before it starts listening.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("unable to create connection pool: {0}")]
    PoolInitialization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("row decode failed: {0}")]
    Decode(#[source] sqlx::Error),
}

/// Request-time failures. Clients only ever see the fixed message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("response encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::Query(_)) => "Failed to query the database",
            ApiError::Store(StoreError::Decode(_)) => "Failed to scan row",
            ApiError::Encode(_) => "Failed to encode response",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(StoreError::Query(e)) => error!("Error querying database: {}", e),
            ApiError::Store(StoreError::Decode(e)) => error!("Error scanning row: {}", e),
            ApiError::Encode(e) => error!("Error encoding response: {}", e),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}
