//! Product service: forwards catalog operations to the repository.

use std::sync::Arc;

use crate::domain::Product;
use crate::error::ApiError;
use crate::persistence::ProductRepository;

/// Pass-through layer over a [`ProductRepository`].
///
/// Adds no validation, retries or transformation: results and errors are
/// returned exactly as the repository produced them.
#[derive(Debug, Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Creates a new `ProductService`.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Returns a reference to the inner repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repository
    }

    /// Returns every stored product.
    ///
    /// # Errors
    ///
    /// Propagates the repository's [`ApiError`].
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products = self.repository.list().await?;
        tracing::debug!(count = products.len(), "products listed");
        Ok(products)
    }

    /// Saves a product by identifier and returns the stored row.
    ///
    /// # Errors
    ///
    /// Propagates the repository's [`ApiError`].
    pub async fn save_product(&self, product: Product) -> Result<Product, ApiError> {
        let created = product.id.is_none();
        let stored = self.repository.upsert(product).await?;
        tracing::info!(product_id = ?stored.id, created, "product saved");
        Ok(stored)
    }
}
