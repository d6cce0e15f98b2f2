//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ProductService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Product service for the catalog resource.
    pub product_service: Arc<ProductService>,
}

impl AppState {
    /// Wraps a service for sharing across handlers.
    #[must_use]
    pub fn new(product_service: ProductService) -> Self {
        Self {
            product_service: Arc::new(product_service),
        }
    }
}
