//! Process-wide settings - the expiry-warning threshold.
//!
//! Readable by any authenticated user, writable only by admins. The value
//! is stored as a string row in `app_settings` and parsed defensively: a
//! missing or mangled row falls back to the default rather than failing
//! the read path.

use crate::{
    auth,
    core::expiry::DEFAULT_EXPIRY_WARNING_DAYS,
    entities::{AppSetting, app_setting, user_profile},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Setting key for the expiry-warning threshold.
pub const EXPIRY_WARNING_DAYS_KEY: &str = "expiry_warning_days";

/// Reads the expiry-warning threshold in days.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_expiry_warning_days(db: &DatabaseConnection) -> Result<i32> {
    let row = AppSetting::find_by_id(EXPIRY_WARNING_DAYS_KEY.to_string())
        .one(db)
        .await?;

    Ok(row
        .and_then(|r| r.value.parse().ok())
        .unwrap_or(DEFAULT_EXPIRY_WARNING_DAYS))
}

/// Writes the expiry-warning threshold. Admin only, range 1-365.
///
/// # Errors
/// Returns an error if:
/// - The caller is not an active admin
/// - `days` is outside 1-365 (`invalid days`)
/// - The database write fails
pub async fn set_expiry_warning_days(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    days: i32,
) -> Result<()> {
    auth::require_admin(actor)?;

    if !(1..=365).contains(&days) {
        return Err(Error::InvalidDays { days: days.into() });
    }

    let now = chrono::Utc::now();
    let existing = AppSetting::find_by_id(EXPIRY_WARNING_DAYS_KEY.to_string())
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let mut row: app_setting::ActiveModel = row.into();
            row.value = Set(days.to_string());
            row.updated_at = Set(now);
            row.update(db).await?;
        }
        None => {
            let row = app_setting::ActiveModel {
                key: Set(EXPIRY_WARNING_DAYS_KEY.to_string()),
                value: Set(days.to_string()),
                updated_at: Set(now),
            };
            row.insert(db).await?;
        }
    }

    Ok(())
}
