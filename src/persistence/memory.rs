//! In-process product store.
//!
//! Mirrors the identifier semantics of a `BIGSERIAL` primary key: ids start
//! at 1, inserts take the next id, and an explicitly supplied id moves the
//! counter forward so later inserts never reuse it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::domain::Product;
use crate::error::ApiError;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// Product store backed by an ordered map behind a [`tokio::sync::RwLock`].
///
/// Reads share the lock. An upsert holds the write lock for its whole
/// duration, so identifier assignment and the row write are atomic.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn upsert(&self, product: Product) -> Result<Product, ApiError> {
        let mut table = self.table.write().await;
        let id = match product.id {
            Some(id) => {
                table.last_id = table.last_id.max(id);
                id
            }
            None => {
                table.last_id = table
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| ApiError::Persistence("identifier space exhausted".to_string()))?;
                table.last_id
            }
        };
        let stored = product.with_id(id);
        table.rows.insert(id, stored.clone());
        tracing::debug!(product_id = id, "product stored in memory");
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
