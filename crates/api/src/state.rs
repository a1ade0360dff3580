use std::sync::Arc;

use movieflix_core::catalog::CatalogService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog service over the configured record store and poster directory.
    pub catalog: Arc<CatalogService>,
}
