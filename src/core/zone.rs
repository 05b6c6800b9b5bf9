//! Zone directory - queries and startup seeding.

use crate::{
    config::zones::ZoneConfig,
    entities::{Zone, zone},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all active zones ordered by their display position.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_active_zones(db: &DatabaseConnection) -> Result<Vec<zone::Model>> {
    Zone::find()
        .filter(zone::Column::Active.eq(true))
        .order_by_asc(zone::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a zone by name, or creates it with the given display position.
///
/// # Errors
/// Returns an error if the database read or insert fails.
pub async fn get_or_create_zone(
    db: &DatabaseConnection,
    name: &str,
    sort_order: i32,
) -> Result<zone::Model> {
    if let Some(existing) = Zone::find()
        .filter(zone::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let row = zone::ActiveModel {
        name: Set(name.to_string()),
        active: Set(true),
        sort_order: Set(sort_order),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Seeds the zone directory from configuration, inserting missing zones.
///
/// Existing zones are left untouched so renames and manual deactivations
/// survive a restart.
///
/// # Errors
/// Returns an error if any database read or insert fails.
pub async fn seed_zones(db: &DatabaseConnection, zones: &[ZoneConfig]) -> Result<()> {
    for config in zones {
        let zone = get_or_create_zone(db, &config.name, config.sort_order).await?;
        info!("Zone '{}' ready (id {})", zone.name, zone.id);
    }
    Ok(())
}
