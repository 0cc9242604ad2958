use std::sync::Arc;

use catalog_db::ProductStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store sits behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Product persistence gateway (PostgreSQL or in-memory).
    pub store: Arc<dyn ProductStore>,
}
