//! Archival workflow - archive, restore, and hard-delete products.
//!
//! States: `active -> archived -> restored | hard-deleted`. Any active user
//! may archive or restore; hard delete is admin-only and additionally
//! demands a retyped product name. Restore is deliberately non-idempotent:
//! restoring an already-active product is an error, not a silent success,
//! so a stale screen learns that its view of the product is outdated.

use crate::{
    auth,
    entities::{
        Inventory, InventoryLog, Product, inventory, inventory_log, product, user_profile,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};

/// Case-insensitive, whitespace-tolerant confirm-name check for hard delete.
///
/// An empty stored name never matches; nothing may be deleted by confirming
/// an empty string.
#[must_use]
pub fn confirm_name_matches(confirm: &str, stored_name: &str) -> bool {
    let stored = stored_name.trim().to_lowercase();
    if stored.is_empty() {
        return false;
    }
    confirm.trim().to_lowercase() == stored
}

/// Archives an active product, recording the reason and timestamp.
///
/// # Errors
/// Returns an error if:
/// - The actor's profile is inactive
/// - The reason is empty after trimming
/// - The product does not exist or is already archived
/// - The database update fails
pub async fn archive_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    product_id: i64,
    reason: &str,
) -> Result<product::Model> {
    auth::require_active(actor)?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(Error::ReasonRequired);
    }

    let mut row: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if !*row.active.as_ref() {
        return Err(Error::AlreadyArchived { id: product_id });
    }

    row.active = Set(false);
    row.archive_reason = Set(Some(reason.to_string()));
    row.archived_at = Set(Some(chrono::Utc::now()));

    row.update(db).await.map_err(Into::into)
}

/// Restores an archived product to the active state.
///
/// The archival metadata is cleared; the ledger history is untouched.
///
/// # Errors
/// Returns an error if:
/// - The actor's profile is inactive
/// - The product does not exist
/// - The product is already active (`not archived`)
/// - The database update fails
pub async fn restore_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    product_id: i64,
) -> Result<product::Model> {
    auth::require_active(actor)?;

    let mut row: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if *row.active.as_ref() {
        return Err(Error::NotArchived { id: product_id });
    }

    row.active = Set(true);
    row.archive_reason = Set(None);
    row.archived_at = Set(None);

    row.update(db).await.map_err(Into::into)
}

/// Permanently deletes an archived product with its ledger and inventory.
///
/// Admin-only, and gated on retyping the product name (case-insensitive,
/// trimmed). The photo object, if any, is removed by the API layer before
/// this runs; this function only touches the database, in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The actor is not an active admin
/// - The product does not exist
/// - The product is still active (`not archived`)
/// - The confirm name does not match (`name mismatch`)
/// - The database transaction fails
pub async fn delete_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    product_id: i64,
    confirm_name: &str,
) -> Result<()> {
    auth::require_admin(actor)?;

    let txn = db.begin().await?;

    let target = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if target.active {
        return Err(Error::NotArchived { id: product_id });
    }

    if !confirm_name_matches(confirm_name, &target.name) {
        return Err(Error::NameMismatch);
    }

    InventoryLog::delete_many()
        .filter(inventory_log::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Inventory::delete_many()
        .filter(inventory::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;

    Ok(())
}

/// Retrieves archived products, newest-archived first.
///
/// # Errors
/// Returns an error if the actor's profile is inactive or the query fails.
pub async fn list_archived_products(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    limit: u64,
) -> Result<Vec<product::Model>> {
    auth::require_active(actor)?;

    Product::find()
        .filter(product::Column::Active.eq(false))
        .order_by_desc(product::Column::ArchivedAt)
        .order_by_desc(product::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
