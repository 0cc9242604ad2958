//! Repository for the `products` table.
//!
//! Every read eager-loads the owning category through a `LEFT JOIN`, so
//! callers always receive a fully populated [`Product`].

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{Product, ProductRow};

/// Product columns joined with the category name.
const SELECT_WITH_CATEGORY: &str = "\
    SELECT p.id, p.name, p.price, p.category_id, c.name AS category_name \
    FROM products p \
    LEFT JOIN categories c ON c.id = p.category_id";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List all products with their categories, ordered by ID ascending.
    pub async fn list_with_category(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("{SELECT_WITH_CATEGORY} ORDER BY p.id ASC");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Find a product by ID with its category.
    pub async fn find_by_id_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("{SELECT_WITH_CATEGORY} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Product::from))
    }

    /// Whether a product row with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new product, returning the stored row with its category.
    ///
    /// `product.id` and `product.category` are ignored; the ID comes from
    /// the sequence and the category is re-read through the join.
    pub async fn insert(pool: &PgPool, product: &Product) -> Result<Product, sqlx::Error> {
        let query = "\
            WITH inserted AS ( \
                INSERT INTO products (name, price, category_id) \
                VALUES ($1, $2, $3) \
                RETURNING id, name, price, category_id \
            ) \
            SELECT i.id, i.name, i.price, i.category_id, c.name AS category_name \
            FROM inserted i \
            LEFT JOIN categories c ON c.id = i.category_id";
        let row = sqlx::query_as::<_, ProductRow>(query)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.category_id)
            .fetch_one(pool)
            .await?;
        Ok(Product::from(row))
    }

    /// Overwrite every persisted column of a product.
    ///
    /// Returns the number of rows affected: `0` means the row no longer
    /// exists.
    pub async fn update(pool: &PgPool, product: &Product) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, price = $3, category_id = $4 WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
