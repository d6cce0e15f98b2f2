//! PostgreSQL implementation of the product gateway.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgArguments, PgPoolOptions, Postgres};
use sqlx::query::QueryAs;

use super::ProductRepository;
use crate::config::AppConfig;
use crate::domain::Product;
use crate::error::ApiError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS products ( \
     id BIGSERIAL PRIMARY KEY, \
     name TEXT, \
     description TEXT, \
     price DOUBLE PRECISION, \
     original_price DOUBLE PRECISION, \
     image_url TEXT, \
     category TEXT, \
     rating DOUBLE PRECISION, \
     reviews INTEGER)";

const COLUMNS: &str =
    "id, name, description, price, original_price, image_url, category, rating, reviews";

/// PostgreSQL-backed product store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a repository over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the database cannot be reached
    /// within the configured connect timeout.
    pub async fn connect(config: &AppConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `products` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), ApiError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("products table ready");
        Ok(())
    }

    async fn insert(&self, product: Product) -> Result<Product, ApiError> {
        let sql = format!(
            "INSERT INTO products \
             (name, description, price, original_price, image_url, category, rating, reviews) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        );
        let row = bind_columns(sqlx::query_as::<_, Product>(&sql), product)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Writes the row with `id`, then moves the id sequence past it so
    /// later inserts cannot collide. Both statements share one transaction.
    async fn replace(&self, id: i64, product: Product) -> Result<Product, ApiError> {
        let sql = format!(
            "INSERT INTO products \
             (id, name, description, price, original_price, image_url, category, rating, reviews) \
             VALUES ($9, $1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
             name = EXCLUDED.name, description = EXCLUDED.description, \
             price = EXCLUDED.price, original_price = EXCLUDED.original_price, \
             image_url = EXCLUDED.image_url, category = EXCLUDED.category, \
             rating = EXCLUDED.rating, reviews = EXCLUDED.reviews \
             RETURNING {COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let row = bind_columns(sqlx::query_as::<_, Product>(&sql), product)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('products', 'id'), $1) \
             WHERE $1 > COALESCE(pg_sequence_last_value(pg_get_serial_sequence('products', 'id')::regclass), 0)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row)
    }
}

/// Binds the eight non-identifier columns as `$1..$8`.
fn bind_columns(
    query: QueryAs<'_, Postgres, Product, PgArguments>,
    product: Product,
) -> QueryAs<'_, Postgres, Product, PgArguments> {
    query
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.original_price)
        .bind(product.image_url)
        .bind(product.category)
        .bind(product.rating)
        .bind(product.reviews)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let sql = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        let rows = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn upsert(&self, product: Product) -> Result<Product, ApiError> {
        let stored = match product.id {
            Some(id) => self.replace(id, product).await?,
            None => self.insert(product).await?,
        };
        tracing::debug!(product_id = ?stored.id, "product stored");
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
