//! Inventory entity - Current stock quantity, one row per product.
//!
//! The row is created alongside the product with stock 0 and only ever
//! mutated through the ledger's adjustment transaction, which guarantees
//! `stock >= 0`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Product this stock count belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Current stock quantity, never negative
    pub stock: i32,
}

/// Defines relationships between Inventory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inventory record belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
