//! Shared domain types for the product catalog service.
//!
//! Holds the primitive aliases, the domain error taxonomy, and the
//! declarative field constraints that both the storage and HTTP layers
//! agree on.

pub mod error;
pub mod product;
pub mod types;
