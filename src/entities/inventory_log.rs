//! Inventory log entity - Append-only ledger of stock adjustments.
//!
//! Each entry snapshots `before_stock`/`after_stock` around a signed,
//! nonzero `delta`; `after_stock = before_stock + delta` is enforced at
//! write time. Rows are never mutated or deleted while the product lives.
//! `note = "ADJUST"` marks a manual correction; otherwise the delta sign
//! distinguishes stock-in from stock-out.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Note value marking a manual stock correction.
pub const NOTE_ADJUST: &str = "ADJUST";

/// Inventory log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_logs")]
pub struct Model {
    /// Unique identifier for the ledger entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product whose stock changed
    pub product_id: i64,
    /// When the adjustment happened
    pub created_at: DateTimeUtc,
    /// Signed stock change, never zero
    pub delta: i32,
    /// Stock before the adjustment
    pub before_stock: i32,
    /// Stock after the adjustment
    pub after_stock: i32,
    /// Optional note; `"ADJUST"` marks a manual correction
    pub note: Option<String>,
    /// User id of the actor who made the adjustment
    pub created_by: String,
}

/// Defines relationships between `InventoryLog` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ledger entry belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each ledger entry was created by one user
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::CreatedBy",
        to = "super::user_profile::Column::UserId"
    )]
    Actor,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
