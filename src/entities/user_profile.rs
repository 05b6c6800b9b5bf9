//! User profile entity - Role and activity flags for each auth identity.
//!
//! The auth provider owns credentials; this table owns everything the
//! application decides on: display name, role, and the `active` flag that
//! blocks all access when false regardless of role.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role string granting user management, hard delete, and settings writes.
pub const ROLE_ADMIN: &str = "admin";
/// Default role for newly created users.
pub const ROLE_STAFF: &str = "staff";

/// User profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users_profile")]
pub struct Model {
    /// Identity id issued by the auth provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Name shown in activity feeds and the user list
    pub display_name: String,
    /// `"admin"` or `"staff"`
    pub role: String,
    /// False blocks all authenticated access
    pub active: bool,
    /// When the profile was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `UserProfile` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user creates many ledger entries
    #[sea_orm(has_many = "super::inventory_log::Entity")]
    InventoryLogs,
}

impl Related<super::inventory_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
