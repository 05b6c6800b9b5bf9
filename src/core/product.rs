//! Product catalog business logic - Handles all product-related operations.
//!
//! Products are created together with their inventory record (stock 0) in
//! one transaction; an optional opening quantity is applied afterwards
//! through the ledger so it shows up as an ordinary stock-in entry. All
//! functions are async and return Result types for proper error handling.

use crate::{
    auth,
    entities::{Inventory, Product, inventory, product, user_profile},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::warn;

/// Field bag for creating or replacing a product.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    /// Product name, required non-empty after trimming
    pub name: String,
    /// Manufacturer, optional
    pub manufacturer: Option<String>,
    /// Zone the product is stored in, None for unzoned
    pub zone_id: Option<i64>,
    /// Sales/stock unit, optional
    pub unit: Option<String>,
    /// Free-form specification, optional
    pub spec: Option<String>,
    /// Country of origin, optional
    pub origin_country: Option<String>,
    /// Expiry date, optional
    pub expiry_date: Option<Date>,
}

/// Normalizes an optional form value: trimmed, empty becomes None.
#[must_use]
pub fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validates a raw opening-quantity string from the create form.
///
/// Unlike an adjustment quantity, an empty field and `"0"` are both valid
/// and mean "no opening stock".
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for non-numeric or out-of-range input.
pub fn parse_initial_quantity(raw: &str) -> Result<i32> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Ok(0);
    }
    if !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidQuantity {
            raw: raw.to_string(),
        });
    }
    normalized.parse().map_err(|_| Error::InvalidQuantity {
        raw: raw.to_string(),
    })
}

fn validated_name(fields: &ProductFields) -> Result<String> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Creates a new product along with its inventory record.
///
/// The product row and the stock-0 inventory row are inserted in one
/// transaction so no product ever exists without a ledger to adjust.
///
/// # Errors
/// Returns an error if:
/// - The actor's profile is inactive
/// - The product name is empty or whitespace-only
/// - The database insert fails
pub async fn create_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    fields: ProductFields,
) -> Result<product::Model> {
    auth::require_active(actor)?;
    let name = validated_name(&fields)?;

    let txn = db.begin().await?;

    let row = product::ActiveModel {
        name: Set(name),
        manufacturer: Set(fields.manufacturer),
        zone_id: Set(fields.zone_id),
        unit: Set(fields.unit),
        spec: Set(fields.spec),
        origin_country: Set(fields.origin_country),
        expiry_date: Set(fields.expiry_date),
        photo_ref: Set(None),
        active: Set(true),
        archive_reason: Set(None),
        archived_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = row.insert(&txn).await?;

    let record = inventory::ActiveModel {
        product_id: Set(created.id),
        stock: Set(0),
    };
    record.insert(&txn).await?;

    txn.commit().await?;

    Ok(created)
}

/// Creates a product and applies a positive opening quantity via the ledger.
///
/// The opening adjustment runs after the create transaction has committed;
/// when it fails the product survives and the failure is returned as a
/// warning next to the created row, matching the create form's behavior.
///
/// # Errors
/// Returns an error only when the product itself cannot be created.
pub async fn create_product_with_initial_stock(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    fields: ProductFields,
    initial_qty: i32,
) -> Result<(product::Model, Option<Error>)> {
    let created = create_product(db, actor, fields).await?;

    if initial_qty > 0 {
        if let Err(e) =
            crate::core::ledger::adjust_stock(db, actor, created.id, initial_qty, None).await
        {
            warn!(
                "Product {} saved but opening stock adjustment failed: {e}",
                created.id
            );
            return Ok((created, Some(e)));
        }
    }

    Ok((created, None))
}

/// Replaces an existing product's editable fields.
///
/// # Errors
/// Returns an error if:
/// - The actor's profile is inactive
/// - The product name is empty or whitespace-only
/// - The product does not exist or is archived
/// - The database update fails
pub async fn update_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    product_id: i64,
    fields: ProductFields,
) -> Result<product::Model> {
    auth::require_active(actor)?;
    let name = validated_name(&fields)?;

    let mut row: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if !*row.active.as_ref() {
        return Err(Error::ProductNotFound { id: product_id });
    }

    row.name = Set(name);
    row.manufacturer = Set(fields.manufacturer);
    row.zone_id = Set(fields.zone_id);
    row.unit = Set(fields.unit);
    row.spec = Set(fields.spec);
    row.origin_country = Set(fields.origin_country);
    row.expiry_date = Set(fields.expiry_date);

    row.update(db).await.map_err(Into::into)
}

/// Stores or clears a product's photo reference after an upload.
///
/// # Errors
/// Returns an error if the product does not exist or the update fails.
pub async fn set_product_photo(
    db: &DatabaseConnection,
    product_id: i64,
    photo_ref: Option<String>,
) -> Result<product::Model> {
    let mut row: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    row.photo_ref = Set(photo_ref);
    row.update(db).await.map_err(Into::into)
}

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::Active.eq(true))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the inventory record for a product.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_inventory(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<inventory::Model>> {
    Inventory::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}
