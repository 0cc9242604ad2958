//! Declarative field constraints for products.
//!
//! These are the only business rules the catalog enforces: a required,
//! bounded-length name and a price within a fixed range. Both the HTTP
//! layer (request validation) and the schema `CHECK` constraints use the
//! same bounds.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Maximum product name length, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Lowest accepted price (0.01).
pub const PRICE_MIN: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Highest accepted price (999999.99).
pub const PRICE_MAX: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Fractional digits a price may carry; matches the `NUMERIC(8, 2)` column.
pub const PRICE_SCALE: u32 = 2;

/// Validate a product name: required (non-empty after trimming) and at
/// most [`NAME_MAX_CHARS`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    let len = name.chars().count();
    if len > NAME_MAX_CHARS {
        return Err(CoreError::Validation(format!(
            "name must be at most {NAME_MAX_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a product price: inclusive range [`PRICE_MIN`, `PRICE_MAX`]
/// with at most [`PRICE_SCALE`] decimal places.
///
/// Over-precise prices are rejected rather than rounded so that every
/// store holds exactly what the client sent.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price < PRICE_MIN || price > PRICE_MAX {
        return Err(CoreError::Validation(format!(
            "price must be between {PRICE_MIN} and {PRICE_MAX}, got {price}"
        )));
    }
    // Trailing zeros (10.500) do not count against the scale.
    if price.normalize().scale() > PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "price must have at most {PRICE_SCALE} decimal places, got {price}"
        )));
    }
    Ok(())
}
