//! Zone entity - Named storage locations used to group products.
//!
//! Zones are reference data seeded from `config.toml` at startup. Products
//! reference at most one zone; an unzoned product is valid.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Zone database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zones")]
pub struct Model {
    /// Unique identifier for the zone
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the zone (e.g., "Freezer 1", "Dry storage")
    pub name: String,
    /// Whether the zone is shown in pickers and aggregates
    pub active: bool,
    /// Display position, ascending
    pub sort_order: i32,
}

/// Defines relationships between Zone and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One zone holds many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
