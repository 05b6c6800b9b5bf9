//! Database configuration module for stockroom.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{AppSetting, Inventory, InventoryLog, Product, UserProfile, Zone};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/stockroom.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation. It creates tables for zones, products, inventory,
/// inventory logs, user profiles, and app settings.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let zone_table = schema.create_table_from_entity(Zone);
    let product_table = schema.create_table_from_entity(Product);
    let inventory_table = schema.create_table_from_entity(Inventory);
    let inventory_log_table = schema.create_table_from_entity(InventoryLog);
    let user_profile_table = schema.create_table_from_entity(UserProfile);
    let app_setting_table = schema.create_table_from_entity(AppSetting);

    db.execute(builder.build(&zone_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&inventory_log_table)).await?;
    db.execute(builder.build(&user_profile_table)).await?;
    db.execute(builder.build(&app_setting_table)).await?;

    Ok(())
}
