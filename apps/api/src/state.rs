use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Injected document store handle. Production wires `MongoStore`;
    /// tests swap in the in-memory implementation.
    pub store: Arc<dyn Store>,
    pub config: Config,
}
