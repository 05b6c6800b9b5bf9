//! User administration business logic - admin-only profile management.
//!
//! All operations here require an active admin caller except
//! [`create_profile`], which the admin API invokes after the auth provider
//! has already created the identity. The one self-protection invariant in
//! the system lives here: an admin cannot deactivate their own profile.

use crate::{
    auth,
    entities::{UserProfile, user_profile},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all user profiles, oldest first.
///
/// # Errors
/// Returns an error if the caller is not an active admin or the query
/// fails.
pub async fn list_user_profiles(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
) -> Result<Vec<user_profile::Model>> {
    auth::require_admin(actor)?;

    UserProfile::find()
        .order_by_asc(user_profile::Column::CreatedAt)
        .order_by_asc(user_profile::Column::UserId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets a user's active flag.
///
/// Deactivating your own profile is rejected regardless of anything else in
/// the payload; a locked-out admin cannot unlock anyone, including
/// themselves.
///
/// # Errors
/// Returns an error if:
/// - The caller is not an active admin
/// - The caller targets themselves with `active = false`
/// - The target profile does not exist
/// - The database update fails
pub async fn set_user_active(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    target_user_id: &str,
    active: bool,
) -> Result<user_profile::Model> {
    auth::require_admin(actor)?;

    if target_user_id == actor.user_id && !active {
        return Err(Error::SelfDeactivate);
    }

    let mut row: user_profile::ActiveModel = UserProfile::find_by_id(target_user_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user_id: target_user_id.to_string(),
        })?
        .into();

    row.active = Set(active);
    row.update(db).await.map_err(Into::into)
}

/// Renames a user's display name.
///
/// A draft equal to the stored name (after trimming) returns the current
/// row without touching the database.
///
/// # Errors
/// Returns an error if:
/// - The caller is not an active admin
/// - The name is empty after trimming
/// - The target profile does not exist
/// - The database update fails
pub async fn set_user_display_name(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    target_user_id: &str,
    display_name: &str,
) -> Result<user_profile::Model> {
    auth::require_admin(actor)?;

    let name = display_name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Display name cannot be empty".to_string(),
        });
    }

    let current = UserProfile::find_by_id(target_user_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user_id: target_user_id.to_string(),
        })?;

    if current.display_name == name {
        return Ok(current);
    }

    let mut row: user_profile::ActiveModel = current.into();
    row.display_name = Set(name.to_string());
    row.update(db).await.map_err(Into::into)
}

/// Creates (or refreshes) the application profile for a new identity.
///
/// Role is fixed to `"staff"` and the profile starts active; upserting on
/// the identity id keeps a retried create from tripping over a leftover
/// row.
///
/// # Errors
/// Returns an error if the database write fails.
pub async fn create_profile(
    db: &DatabaseConnection,
    user_id: &str,
    display_name: &str,
) -> Result<user_profile::Model> {
    use sea_orm::sea_query::OnConflict;

    let row = user_profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        display_name: Set(display_name.to_string()),
        role: Set(user_profile::ROLE_STAFF.to_string()),
        active: Set(true),
        created_at: Set(chrono::Utc::now()),
    };

    UserProfile::insert(row)
        .on_conflict(
            OnConflict::column(user_profile::Column::UserId)
                .update_columns([
                    user_profile::Column::DisplayName,
                    user_profile::Column::Role,
                    user_profile::Column::Active,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    UserProfile::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user_id: user_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_list_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_custom_user(&db, "staff-1", "Staff One", "staff", true).await?;

        let result = list_user_profiles(&db, &staff).await;
        assert!(matches!(result.unwrap_err(), Error::AdminOnly));

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_admin_is_blocked() -> Result<()> {
        let db = setup_test_db().await?;
        let frozen = create_custom_user(&db, "admin-2", "Frozen Admin", "admin", false).await?;

        let result = list_user_profiles(&db, &frozen).await;
        assert!(matches!(result.unwrap_err(), Error::InactiveUser));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_user_active_toggles_target() -> Result<()> {
        let (db, admin) = setup_with_user().await?;
        let staff = create_custom_user(&db, "staff-1", "Staff One", "staff", true).await?;

        let updated = set_user_active(&db, &admin, &staff.user_id, false).await?;
        assert!(!updated.active);

        let restored = set_user_active(&db, &admin, &staff.user_id, true).await?;
        assert!(restored.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_cannot_deactivate_self() -> Result<()> {
        let (db, admin) = setup_with_user().await?;

        let result = set_user_active(&db, &admin, &admin.user_id, false).await;
        assert!(matches!(result.unwrap_err(), Error::SelfDeactivate));

        // Profile untouched
        let profile = auth::fetch_profile(&db, &admin.user_id).await?.unwrap();
        assert!(profile.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_display_name() -> Result<()> {
        let (db, admin) = setup_with_user().await?;
        let staff = create_custom_user(&db, "staff-1", "Staff One", "staff", true).await?;

        let renamed =
            set_user_display_name(&db, &admin, &staff.user_id, "  Staff Won  ").await?;
        assert_eq!(renamed.display_name, "Staff Won");

        let empty = set_user_display_name(&db, &admin, &staff.user_id, "   ").await;
        assert!(matches!(empty.unwrap_err(), Error::Config { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_display_name_unchanged_is_noop() -> Result<()> {
        let (db, admin) = setup_with_user().await?;
        let staff = create_custom_user(&db, "staff-1", "Staff One", "staff", true).await?;

        let unchanged =
            set_user_display_name(&db, &admin, &staff.user_id, " Staff One ").await?;
        assert_eq!(unchanged.display_name, "Staff One");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_profile_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let profile = create_profile(&db, "uid-123", "New Staffer").await?;
        assert_eq!(profile.user_id, "uid-123");
        assert_eq!(profile.display_name, "New Staffer");
        assert_eq!(profile.role, "staff");
        assert!(profile.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_profile_upserts_on_conflict() -> Result<()> {
        let db = setup_test_db().await?;

        create_profile(&db, "uid-123", "First Name").await?;
        let refreshed = create_profile(&db, "uid-123", "Second Name").await?;
        assert_eq!(refreshed.display_name, "Second Name");

        let all: Vec<_> = UserProfile::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }
}
