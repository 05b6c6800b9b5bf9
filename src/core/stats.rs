//! Dashboard aggregates.
//!
//! Each count is an independent query so that one failing aggregate (a
//! single zone, say) can be surfaced on its own without blanking the rest
//! of the dashboard.

use crate::{
    entities::{InventoryLog, Product, inventory_log, product},
    errors::Result,
};
use sea_orm::{PaginatorTrait, prelude::*};

/// Number of active products.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn count_active_products(db: &DatabaseConnection) -> Result<u64> {
    Product::find()
        .filter(product::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Number of active products stored in one zone.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn count_active_products_in_zone(
    db: &DatabaseConnection,
    zone_id: i64,
) -> Result<u64> {
    Product::find()
        .filter(product::Column::Active.eq(true))
        .filter(product::Column::ZoneId.eq(zone_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Number of manual corrections (`note = "ADJUST"`) in `[start, end)`.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn count_adjust_logs_between(
    db: &DatabaseConnection,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
) -> Result<u64> {
    InventoryLog::find()
        .filter(inventory_log::Column::Note.eq(inventory_log::NOTE_ADJUST))
        .filter(inventory_log::Column::CreatedAt.gte(start))
        .filter(inventory_log::Column::CreatedAt.lt(end))
        .count(db)
        .await
        .map_err(Into::into)
}
