//! Entity structs (database rows).

pub mod category;
pub mod product;
