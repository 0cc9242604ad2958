//! In-process [`ProductStore`] used when no `DATABASE_URL` is configured.
//!
//! Mirrors the PostgreSQL store's observable behaviour: sequential IDs,
//! ID-ordered listing, category eager-loading, foreign key checks on
//! `category_id`, and [`UpdateOutcome::Conflict`] for vanished rows.

use std::collections::BTreeMap;

use async_trait::async_trait;
use catalog_core::types::DbId;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::models::category::Category;
use crate::models::product::Product;
use crate::store::{ProductStore, StoreError, UpdateOutcome};

/// Persisted columns of a product (no loaded category).
#[derive(Debug, Clone)]
struct ProductRecord {
    name: String,
    price: Decimal,
    category_id: Option<DbId>,
}

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<DbId, ProductRecord>,
    categories: BTreeMap<DbId, Category>,
    last_id: DbId,
}

impl Tables {
    fn load(&self, id: DbId, record: &ProductRecord) -> Product {
        Product {
            id,
            name: record.name.clone(),
            price: record.price,
            category_id: record.category_id,
            category: record
                .category_id
                .and_then(|cid| self.categories.get(&cid).cloned()),
        }
    }

    fn check_category(&self, category_id: Option<DbId>) -> Result<(), StoreError> {
        match category_id {
            Some(cid) if !self.categories.contains_key(&cid) => {
                Err(StoreError::UnknownCategory(cid))
            }
            _ => Ok(()),
        }
    }
}

/// Product store held entirely in memory behind a `tokio` read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    tables: RwLock<Tables>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with reference categories.
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn record_of(product: &Product) -> ProductRecord {
    ProductRecord {
        name: product.name.clone(),
        price: product.price,
        category_id: product.category_id,
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .map(|(id, record)| tables.load(*id, record))
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).map(|record| tables.load(id, record)))
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.products.contains_key(&id))
    }

    async fn insert(&self, product: &Product) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_category(product.category_id)?;
        tables.last_id += 1;
        let id = tables.last_id;
        let record = record_of(product);
        let stored = tables.load(id, &record);
        tables.products.insert(id, record);
        Ok(stored)
    }

    async fn update(&self, product: &Product) -> Result<UpdateOutcome, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&product.id) {
            return Ok(UpdateOutcome::Conflict);
        }
        tables.check_category(product.category_id)?;
        tables.products.insert(product.id, record_of(product));
        Ok(UpdateOutcome::Updated)
    }

    async fn delete(&self, product: &Product) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .write()
            .await
            .products
            .remove(&product.id)
            .is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
