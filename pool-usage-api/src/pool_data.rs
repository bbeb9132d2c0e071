use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

pub const POOL_DATA_PATH: &str = "/pool-data";

pub fn router(state: Arc<AppState>) -> Router {
    // Any origin may read the data, on error responses as well
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route(POOL_DATA_PATH, get(pool_data_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Returns every reading as a JSON array in ascending timestamp order.
///
/// The whole array is encoded before anything is written, so a failure at any
/// step still produces a clean 500.
pub async fn pool_data_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    debug!("Received pool-data request");

    let points = state.store.fetch_all().await?;
    let body = serde_json::to_vec(&points)?;

    debug!("Returning {} data point(s)", points.len());
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
