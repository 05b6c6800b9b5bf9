//! Stock ledger - Handles all stock-quantity operations.
//!
//! The ledger is the current stock count per product plus an append-only
//! log of adjustments with before/after snapshots. All stock mutations go
//! through [`adjust_stock`], which runs in one database transaction: it
//! reads the current count, refuses any adjustment that would drive stock
//! negative, then writes the updated count and the log row together. The
//! log is never mutated afterwards, so `after_stock = before_stock + delta`
//! holds for every entry and consecutive entries chain without gaps.

use crate::{
    auth,
    entities::{
        Inventory, InventoryLog, Product, inventory, inventory_log, user_profile,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};

/// Entries shown on the dashboard activity feed.
pub const RECENT_ACTIVITY_LIMIT: u64 = 20;
/// Entries shown on the product detail ledger view.
pub const PRODUCT_LOGS_LIMIT: u64 = 50;

/// Kind of stock movement a ledger entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Stock received
    In,
    /// Stock shipped out
    Out,
    /// Manual correction
    Adjust,
}

/// A ledger entry joined with the acting user's stored display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// The raw ledger row
    pub log: inventory_log::Model,
    /// Display name of the actor, if the profile still exists
    pub actor_name: Option<String>,
}

/// Validates a raw quantity string from an adjustment form.
///
/// Only strings of ASCII digits denoting a strictly positive integer pass;
/// everything else is rejected locally, before any store call is made.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for empty, non-numeric, zero, or
/// out-of-range input.
pub fn parse_adjust_quantity(raw: &str) -> Result<i32> {
    let normalized = raw.trim();
    let invalid = || Error::InvalidQuantity {
        raw: raw.to_string(),
    };

    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let quantity: i32 = normalized.parse().map_err(|_| invalid())?;
    if quantity <= 0 {
        return Err(invalid());
    }
    Ok(quantity)
}

/// Applies a signed stock adjustment and appends the matching log entry.
///
/// Runs in a single database transaction: the current count is read, the
/// resulting count is checked against zero, and the count update plus the
/// log insert commit together or not at all. Stock is left untouched by any
/// rejected call. Callers re-read ledger state after success instead of
/// applying the delta locally.
///
/// # Errors
/// Returns an error if:
/// - The actor's profile is inactive
/// - `delta` is zero
/// - The product does not exist or is archived
/// - The adjustment would drive stock negative
/// - The database transaction fails
pub async fn adjust_stock(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    product_id: i64,
    delta: i32,
    note: Option<String>,
) -> Result<inventory_log::Model> {
    auth::require_active(actor)?;

    if delta == 0 {
        return Err(Error::ZeroDelta);
    }

    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    if !product.active {
        return Err(Error::ProductNotFound { id: product_id });
    }

    let record = Inventory::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let before = record.stock;
    let after = before + delta;
    if after < 0 {
        return Err(Error::InsufficientStock {
            current: before,
            requested: -delta,
        });
    }

    // Relative update rather than a write of the computed value, so two
    // racing adjustments cannot overwrite each other's count.
    use sea_orm::sea_query::Expr;
    Inventory::update_many()
        .col_expr(
            inventory::Column::Stock,
            Expr::col(inventory::Column::Stock).add(delta),
        )
        .filter(inventory::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    let entry = inventory_log::ActiveModel {
        product_id: Set(product_id),
        created_at: Set(chrono::Utc::now()),
        delta: Set(delta),
        before_stock: Set(before),
        after_stock: Set(after),
        note: Set(note),
        created_by: Set(actor.user_id.clone()),
        ..Default::default()
    };
    let result = entry.insert(&txn).await?;

    txn.commit().await?;

    Ok(result)
}

/// Retrieves the newest ledger entries across all products.
///
/// Ordered newest-first and capped; each entry carries the actor's stored
/// display name when the profile still exists.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_recent_activity(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<ActivityEntry>> {
    let rows = InventoryLog::find()
        .find_also_related(crate::entities::UserProfile)
        .order_by_desc(inventory_log::Column::CreatedAt)
        .order_by_desc(inventory_log::Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(log, profile)| ActivityEntry {
            actor_name: profile.map(|p| p.display_name),
            log,
        })
        .collect())
}

/// Retrieves the newest ledger entries for one product.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_logs_for_product(
    db: &DatabaseConnection,
    product_id: i64,
    limit: u64,
) -> Result<Vec<ActivityEntry>> {
    let rows = InventoryLog::find()
        .find_also_related(crate::entities::UserProfile)
        .filter(inventory_log::Column::ProductId.eq(product_id))
        .order_by_desc(inventory_log::Column::CreatedAt)
        .order_by_desc(inventory_log::Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(log, profile)| ActivityEntry {
            actor_name: profile.map(|p| p.display_name),
            log,
        })
        .collect())
}

/// Display label for the actor of a ledger entry.
///
/// Prefers the stored display name, falls back to an 8-character prefix of
/// the identity id, then to a literal placeholder.
#[must_use]
pub fn actor_label(actor_name: Option<&str>, created_by: &str) -> String {
    if let Some(name) = actor_name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let id = created_by.trim();
    if !id.is_empty() {
        return id.chars().take(8).collect();
    }
    "unknown".to_string()
}

/// Classifies a ledger entry as stock-in, stock-out, or manual correction.
#[must_use]
pub fn movement_kind(note: Option<&str>, delta: i32) -> MovementKind {
    if note.map(str::trim) == Some(inventory_log::NOTE_ADJUST) {
        return MovementKind::Adjust;
    }
    if delta > 0 {
        MovementKind::In
    } else if delta < 0 {
        MovementKind::Out
    } else {
        MovementKind::Adjust
    }
}
