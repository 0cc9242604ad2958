//! Transfer shapes for the `/products` resource and their mapping to and
//! from the stored entities.
//!
//! The DTOs mirror the entities field for field; only the JSON casing and
//! the request validation rules differ.

use std::borrow::Cow;

use catalog_core::error::CoreError;
use catalog_core::product::{validate_name, validate_price};
use catalog_core::types::DbId;
use catalog_db::models::category::Category;
use catalog_db::models::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Wire shape of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: DbId,
    pub name: String,
}

/// Wire shape of a product, used for both requests and responses.
///
/// `name` and `price` default when missing so that an absent field is
/// reported by validation with field-level detail rather than as a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Ignored on create; must match the path ID on update.
    #[serde(default)]
    pub id: DbId,
    #[serde(default)]
    #[validate(custom(function = "name_constraint"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "price_constraint"))]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
}

impl ProductDto {
    /// Overwrite every mapped field of `product` except its ID.
    ///
    /// Fields absent from the DTO clear the stored value; there is no
    /// partial update.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.price = self.price;
        product.category_id = self.category_id;
        product.category = self.category.map(Category::from);
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        CategoryDto {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            id: product.id,
            name: product.name,
            price: product.price,
            category_id: product.category_id,
            category: product.category.map(CategoryDto::from),
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            price: dto.price,
            category_id: dto.category_id,
            category: dto.category.map(Category::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn to_validation_error(code: &'static str, err: CoreError) -> ValidationError {
    let message = match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    };
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn name_constraint(name: &str) -> Result<(), ValidationError> {
    validate_name(name).map_err(|e| to_validation_error("name", e))
}

fn price_constraint(price: &Decimal) -> Result<(), ValidationError> {
    validate_price(*price).map_err(|e| to_validation_error("price", e))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_dto() -> ProductDto {
        ProductDto {
            id: 5,
            name: "Desk".to_string(),
            price: Decimal::new(14999, 2),
            category_id: Some(2),
            category: Some(CategoryDto {
                id: 2,
                name: "Furniture".to_string(),
            }),
        }
    }

    // -- mapping -------------------------------------------------------------

    #[test]
    fn dto_round_trips_through_entity() {
        let dto = sample_dto();
        assert_eq!(ProductDto::from(Product::from(dto.clone())), dto);
    }

    #[test]
    fn entity_round_trips_through_dto() {
        let product = Product::from(sample_dto());
        assert_eq!(Product::from(ProductDto::from(product.clone())), product);
    }

    #[test]
    fn dto_without_category_round_trips() {
        let dto = ProductDto {
            category_id: None,
            category: None,
            ..sample_dto()
        };
        assert_eq!(ProductDto::from(Product::from(dto.clone())), dto);
    }

    #[test]
    fn apply_to_overwrites_everything_but_id() {
        let mut product = Product::from(sample_dto());
        let update = ProductDto {
            id: 99,
            name: "Updated Product".to_string(),
            price: Decimal::new(25, 0),
            category_id: None,
            category: None,
        };

        update.apply_to(&mut product);

        assert_eq!(product.id, 5);
        assert_eq!(product.name, "Updated Product");
        assert_eq!(product.price, Decimal::new(25, 0));
        assert_eq!(product.category_id, None);
        assert_eq!(product.category, None);
    }

    // -- serialization -------------------------------------------------------

    #[test]
    fn serializes_camel_case_and_omits_absent_category() {
        let dto = ProductDto {
            category_id: None,
            category: None,
            ..sample_dto()
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value, json!({"id": 5, "name": "Desk", "price": 149.99}));
    }

    #[test]
    fn deserializes_category_id() {
        let dto: ProductDto =
            serde_json::from_value(json!({"name": "Pen", "price": 2.5, "categoryId": 3})).unwrap();
        assert_eq!(dto.id, 0);
        assert_eq!(dto.category_id, Some(3));
        assert_eq!(dto.price, Decimal::new(25, 1));
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn valid_dto_passes() {
        assert!(sample_dto().validate().is_ok());
    }

    #[test]
    fn missing_name_and_price_report_both_fields() {
        let dto: ProductDto = serde_json::from_value(json!({})).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let dto = ProductDto {
            name: "x".repeat(101),
            ..sample_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn out_of_range_price_is_rejected() {
        let dto = ProductDto {
            price: Decimal::new(100_000_000, 2),
            ..sample_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }
}
