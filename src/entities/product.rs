//! Product entity - A sellable item tracked in the warehouse.
//!
//! `active = false` is the archived state: hidden from stock-facing views
//! but retained with full ledger history until an admin hard-deletes it.
//! `archive_reason`/`archived_at` describe the current archived state and
//! are cleared on restore.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product name; non-empty while the product is active
    pub name: String,
    /// Manufacturer, if recorded
    pub manufacturer: Option<String>,
    /// Zone this product is stored in, None for unzoned
    pub zone_id: Option<i64>,
    /// Sales/stock unit (e.g., "box", "ea")
    pub unit: Option<String>,
    /// Free-form specification (weight, count per box, ...)
    pub spec: Option<String>,
    /// Country of origin
    pub origin_country: Option<String>,
    /// Expiry date used for the approaching-expiry badge
    pub expiry_date: Option<Date>,
    /// Photo reference: a storage-relative path or an external URL
    pub photo_ref: Option<String>,
    /// False means archived
    pub active: bool,
    /// Why the product was archived, set while archived
    pub archive_reason: Option<String>,
    /// When the product was archived, set while archived
    pub archived_at: Option<DateTimeUtc>,
    /// When the product was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product may belong to one zone
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id"
    )]
    Zone,
    /// One product has one inventory record
    #[sea_orm(has_one = "super::inventory::Entity")]
    Inventory,
    /// One product has many ledger entries
    #[sea_orm(has_many = "super::inventory_log::Entity")]
    InventoryLogs,
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::inventory_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
