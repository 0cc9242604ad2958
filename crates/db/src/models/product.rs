//! Product entity model.

use catalog_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::models::category::Category;

/// A product with its category eager-loaded.
///
/// `category` is never written; it is populated from `category_id` by the
/// store on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub category_id: Option<DbId>,
    pub category: Option<Category>,
}

/// Flat `products LEFT JOIN categories` row.
#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(Category { id, name }),
            _ => None,
        };
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            category_id: row.category_id,
            category,
        }
    }
}
