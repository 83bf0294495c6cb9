//! Entity module - `SeaORM` entity definitions for the remote storage backend.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod product;

// Re-export specific types to avoid conflicts
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
