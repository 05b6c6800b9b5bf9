//! App setting entity - Stores key-value pairs for process-wide settings.
//! Currently holds the expiry-warning threshold; values are stored as
//! strings and parsed by the settings module.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// App setting database model - stores key-value configuration pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_settings")]
pub struct Model {
    /// Setting key (e.g., `"expiry_warning_days"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Setting value stored as string
    pub value: String,
    /// When this setting was last modified
    pub updated_at: DateTimeUtc,
}

/// `AppSetting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
