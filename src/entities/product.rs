//! Product entity - the remote variant's per-user document row.
//!
//! Each row carries the owning user's identifier; loads are always filtered
//! by owner and ordered by creation time descending, so one user never sees
//! another user's products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the row; stringified, it becomes the product's handle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identifier of the user who owns this product
    pub owner_id: String,
    /// Product name, non-empty
    pub name: String,
    /// Optional free-text description, stored empty when absent
    pub description: String,
    /// The 12-digit barcode value, generated once at creation
    pub code: String,
    /// When the product was saved
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
