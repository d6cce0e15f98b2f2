//! Persistence layer: the product gateway and its storage adapters.
//!
//! [`ProductRepository`] is the only contract the service layer consumes.
//! [`postgres::PostgresProductRepository`] backs it with a `sqlx::PgPool`;
//! [`memory::InMemoryProductRepository`] keeps rows in process and is used
//! when persistence is disabled.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::Product;
use crate::error::ApiError;

pub use memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

/// Gateway over the `products` table.
#[async_trait]
pub trait ProductRepository: Send + Sync + std::fmt::Debug {
    /// Short name of the backing store, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Returns every stored product, in primary-key order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the store cannot be read.
    async fn list(&self) -> Result<Vec<Product>, ApiError>;

    /// Saves a product by identifier.
    ///
    /// Without an identifier the product is inserted and the store assigns
    /// the next one. With an identifier the row carrying it is overwritten,
    /// or created when absent. Returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the write fails.
    async fn upsert(&self, product: Product) -> Result<Product, ApiError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the store does not answer.
    async fn ping(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
pub(crate) use unavailable::UnavailableRepository;
