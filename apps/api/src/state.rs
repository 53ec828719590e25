use std::sync::Arc;

use crate::store::HashStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup. `RedisStore` in production.
    pub store: Arc<dyn HashStore>,
}
