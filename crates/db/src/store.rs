//! The product store seam.
//!
//! Handlers hold an `Arc<dyn ProductStore>` so the same request logic runs
//! against PostgreSQL in production and against
//! [`InMemoryProductStore`](crate::memory::InMemoryProductStore) when no
//! database is configured.

use async_trait::async_trait;
use catalog_core::types::DbId;

use crate::models::product::Product;
use crate::repositories::ProductRepo;
use crate::DbPool;

/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Result of a full-record update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was overwritten.
    Updated,
    /// The target row was gone at write time (deleted after it was read).
    Conflict,
}

/// Errors raised by a [`ProductStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any failure from the database driver.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// `category_id` does not reference an existing category.
    #[error("Category {0} does not exist")]
    UnknownCategory(DbId),
}

/// CRUD access to products, each read eager-loading the category.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by ID ascending.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// A single product, or `None` if no row has this ID.
    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError>;

    async fn exists(&self, id: DbId) -> Result<bool, StoreError>;

    /// Persist a new product. The incoming `id` is ignored and the stored
    /// row (with generated ID and loaded category) is returned.
    async fn insert(&self, product: &Product) -> Result<Product, StoreError>;

    /// Overwrite the row identified by `product.id`.
    ///
    /// Reports [`UpdateOutcome::Conflict`] if the row vanished between the
    /// caller's read and this write.
    async fn update(&self, product: &Product) -> Result<UpdateOutcome, StoreError>;

    /// Remove a product. Returns `true` if a row was removed.
    async fn delete(&self, product: &Product) -> Result<bool, StoreError>;

    /// Probe the backing storage.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`ProductStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Translate foreign key violations on `category_id` into
/// [`StoreError::UnknownCategory`].
fn classify_write_error(err: sqlx::Error, product: &Product) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            if let Some(category_id) = product.category_id {
                return StoreError::UnknownCategory(category_id);
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(ProductRepo::list_with_category(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        Ok(ProductRepo::find_by_id_with_category(&self.pool, id).await?)
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProductRepo::exists(&self.pool, id).await?)
    }

    async fn insert(&self, product: &Product) -> Result<Product, StoreError> {
        ProductRepo::insert(&self.pool, product)
            .await
            .map_err(|e| classify_write_error(e, product))
    }

    async fn update(&self, product: &Product) -> Result<UpdateOutcome, StoreError> {
        let affected = ProductRepo::update(&self.pool, product)
            .await
            .map_err(|e| classify_write_error(e, product))?;
        if affected == 0 {
            tracing::debug!(product_id = product.id, "Update affected no rows");
            return Ok(UpdateOutcome::Conflict);
        }
        Ok(UpdateOutcome::Updated)
    }

    async fn delete(&self, product: &Product) -> Result<bool, StoreError> {
        Ok(ProductRepo::delete(&self.pool, product.id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
