use crate::db::{PgUsageStore, UsageStore};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn UsageStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        AppState { store }
    }

    // The pool handle is cheap to clone; the caller keeps one to close at shutdown.
    pub fn from_pool(pool: PgPool) -> Self {
        AppState::new(Arc::new(PgUsageStore::new(pool)))
    }
}
