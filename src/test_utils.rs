//! Shared test utilities for stockroom.
//!
//! This module provides common helper functions for setting up test
//! databases, creating test entities with sensible defaults, and the
//! in-memory doubles for the hosted auth/storage collaborators.

#![allow(clippy::unwrap_used)]

use crate::{
    api::AppState,
    auth::{AuthProvider, MIN_PASSWORD_LENGTH},
    cache::ExpiryDaysCache,
    core::product::{self, ProductFields},
    entities::user_profile,
    errors::{Error, Result},
    storage::BlobStore,
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An active admin profile that never touched a database.
/// For validation tests running against a `MockDatabase`.
#[must_use]
pub fn admin_model_fixture() -> user_profile::Model {
    user_profile::Model {
        user_id: "admin-1".to_string(),
        display_name: "Test User".to_string(),
        role: "admin".to_string(),
        active: true,
        created_at: chrono::Utc::now(),
    }
}

/// An inactive staff profile that never touched a database.
#[must_use]
pub fn inactive_model_fixture() -> user_profile::Model {
    user_profile::Model {
        user_id: "blocked-1".to_string(),
        display_name: "Blocked User".to_string(),
        role: "staff".to_string(),
        active: false,
        created_at: chrono::Utc::now(),
    }
}

/// Inserts a user profile row directly with the given role and activity.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    user_id: &str,
    display_name: &str,
    role: &str,
    active: bool,
) -> Result<user_profile::Model> {
    let row = user_profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        display_name: Set(display_name.to_string()),
        role: Set(role.to_string()),
        active: Set(active),
        created_at: Set(chrono::Utc::now()),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Sets up a database plus an active admin user.
/// Returns (db, admin) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, user_profile::Model)> {
    let db = setup_test_db().await?;
    let admin = create_custom_user(&db, "admin-1", "Test User", "admin", true).await?;
    Ok((db, admin))
}

/// Creates a test product with sensible defaults (no zone, no expiry).
pub async fn create_test_product(
    db: &DatabaseConnection,
    actor: &user_profile::Model,
    name: &str,
) -> Result<crate::entities::product::Model> {
    product::create_product(
        db,
        actor,
        ProductFields {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Sets up a complete test environment with an admin and a product.
/// Returns (db, admin, product) for ledger and archival tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    user_profile::Model,
    crate::entities::product::Model,
)> {
    let (db, admin) = setup_with_user().await?;
    let product = create_test_product(&db, &admin, "Test Product").await?;
    Ok((db, admin, product))
}

/// Current stock count for a product.
pub async fn stock_of(db: &DatabaseConnection, product_id: i64) -> Result<i32> {
    let record = product::get_inventory(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    Ok(record.stock)
}

/// In-memory [`AuthProvider`] double.
///
/// Tokens are granted explicitly; identities are keyed by email and handed
/// sequential ids. Credential validation mirrors the hosted service's
/// behavior closely enough for the route tests: email must contain `@`,
/// password must meet the minimum length, and a known email is a duplicate.
#[derive(Default)]
pub struct StubAuth {
    tokens: Mutex<HashMap<String, String>>,
    identities: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
    next_id: AtomicU64,
}

impl StubAuth {
    /// Creates an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `token` resolve to `user_id`.
    pub fn grant_token(&self, token: &str, user_id: &str) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), user_id.to_string());
    }

    /// True when an identity with this email currently exists.
    #[must_use]
    pub fn has_identity(&self, email: &str) -> bool {
        self.identities.lock().unwrap().contains_key(email)
    }

    /// Number of identities deleted through the compensation path.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthProvider for StubAuth {
    async fn verify_token(&self, access_token: &str) -> Result<String> {
        self.tokens
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(Error::NotAuthenticated)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<String> {
        if !email.contains('@') {
            return Err(Error::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(Error::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }

        let mut identities = self.identities.lock().unwrap();
        if identities.contains_key(email) {
            return Err(Error::DuplicateEmail);
        }
        let id = format!("stub-user-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        identities.insert(email.to_string(), id.clone());
        Ok(id)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.identities
            .lock()
            .unwrap()
            .retain(|_, id| id != user_id);
        self.deleted.lock().unwrap().push(user_id.to_string());
        Ok(())
    }
}

/// In-memory [`BlobStore`] double recording every remove call.
#[derive(Default)]
pub struct StubStorage {
    removed: Mutex<Vec<Vec<String>>>,
    fail_next: AtomicBool,
}

impl StubStorage {
    /// Creates an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches of paths removed so far.
    #[must_use]
    pub fn removed_paths(&self) -> Vec<Vec<String>> {
        self.removed.lock().unwrap().clone()
    }

    /// Makes the next remove call fail.
    pub fn fail_next_remove(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for StubStorage {
    async fn remove(&self, paths: &[String]) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Storage {
                message: "stubbed storage failure".to_string(),
            });
        }
        self.removed.lock().unwrap().push(paths.to_vec());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.test/object/public/product-photos/{path}")
    }
}

/// Everything the admin API route tests need alongside the state.
pub struct ApiFixture {
    /// Active admin profile
    pub admin: user_profile::Model,
    /// Active staff profile
    pub staff: user_profile::Model,
    /// Token resolving to the admin
    pub admin_token: String,
    /// Token resolving to the staff user
    pub staff_token: String,
    /// The auth double, for asserting on identities
    pub auth: Arc<StubAuth>,
    /// The storage double, for asserting on removed objects
    pub storage: Arc<StubStorage>,
}

/// Builds an [`AppState`] over a fresh in-memory database with stub
/// collaborators and one admin plus one staff profile.
pub async fn setup_api_state() -> Result<(AppState, ApiFixture)> {
    let db = setup_test_db().await?;
    let admin = create_custom_user(&db, "admin-1", "Test Admin", "admin", true).await?;
    let staff = create_custom_user(&db, "staff-9", "Test Staff", "staff", true).await?;

    let auth = Arc::new(StubAuth::new());
    auth.grant_token("admin-token", "admin-1");
    auth.grant_token("staff-token", "staff-9");
    let storage = Arc::new(StubStorage::new());

    let state = AppState {
        db: Arc::new(db),
        auth: Some(auth.clone()),
        storage: Some(storage.clone()),
        expiry_cache: ExpiryDaysCache::new(),
    };

    let fixture = ApiFixture {
        admin,
        staff,
        admin_token: "admin-token".to_string(),
        staff_token: "staff-token".to_string(),
        auth,
        storage,
    };

    Ok((state, fixture))
}

/// Reads a response body as JSON.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
