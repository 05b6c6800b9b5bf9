//! Auth collaborator - token verification, identity administration, and
//! the role/activity gates used by every protected operation.
//!
//! Credentials live in the hosted auth service; this crate only ever sees
//! opaque access tokens and identity ids. [`AuthProvider`] is the seam the
//! admin API and tests plug implementations into; [`PlatformAuth`] is the
//! HTTP-backed production implementation.

use crate::config::PlatformConfig;
use crate::entities::{UserProfile, user_profile};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;

/// Minimum password length enforced by the hosted auth service.
pub const MIN_PASSWORD_LENGTH: u32 = 6;

/// Identity operations backed by the hosted auth service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves an access token to the identity id it belongs to.
    ///
    /// # Errors
    /// Returns [`Error::NotAuthenticated`] when the token is missing,
    /// expired, or unknown.
    async fn verify_token(&self, access_token: &str) -> Result<String>;

    /// Creates a new identity and returns its id.
    ///
    /// # Errors
    /// Returns a duplicate-email, invalid-email, or weak-password error
    /// when the service rejects the credentials.
    async fn create_user(&self, email: &str, password: &str) -> Result<String>;

    /// Deletes an identity. Used as the compensating action when profile
    /// creation fails after the identity already exists.
    ///
    /// # Errors
    /// Returns an error if the service call fails.
    async fn delete_user(&self, user_id: &str) -> Result<()>;
}

/// Fetches the application profile for an identity id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn fetch_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<user_profile::Model>> {
    UserProfile::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Rejects callers whose profile has been deactivated.
///
/// # Errors
/// Returns [`Error::InactiveUser`] when the profile is inactive.
pub fn require_active(profile: &user_profile::Model) -> Result<()> {
    if profile.active {
        Ok(())
    } else {
        Err(Error::InactiveUser)
    }
}

/// Rejects callers that are not active admins.
///
/// # Errors
/// Returns [`Error::InactiveUser`] for deactivated profiles and
/// [`Error::AdminOnly`] for non-admin roles.
pub fn require_admin(profile: &user_profile::Model) -> Result<()> {
    require_active(profile)?;
    if profile.role == user_profile::ROLE_ADMIN {
        Ok(())
    } else {
        Err(Error::AdminOnly)
    }
}

/// Maps an identity-creation failure message to a structured error.
///
/// The hosted service reports credential problems as message text; the
/// phrases matched here are the ones it actually emits.
#[must_use]
pub fn map_identity_error(message: &str) -> Error {
    let lowered = message.to_lowercase();
    if lowered.contains("already registered") || lowered.contains("duplicate") {
        return Error::DuplicateEmail;
    }
    if lowered.contains("invalid email") {
        return Error::InvalidEmail;
    }
    if lowered.contains("password") && lowered.contains("least") {
        return Error::WeakPassword {
            min_length: MIN_PASSWORD_LENGTH,
        };
    }
    Error::AuthProvider {
        message: message.to_string(),
    }
}

/// HTTP-backed [`AuthProvider`] for the hosted platform.
pub struct PlatformAuth {
    base_url: String,
    anon_key: String,
    service_role_key: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct IdentityPayload {
    id: String,
}

impl PlatformAuth {
    /// Builds a provider from the platform connection settings.
    #[must_use]
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for PlatformAuth {
    async fn verify_token(&self, access_token: &str) -> Result<String> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .bearer_auth(access_token)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| Error::AuthProvider {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Error::NotAuthenticated);
        }

        let payload: IdentityPayload =
            response.json().await.map_err(|e| Error::AuthProvider {
                message: e.to_string(),
            })?;
        Ok(payload.id)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(self.auth_url("admin/users"))
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(|e| Error::AuthProvider {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(map_identity_error(&message));
        }

        let payload: IdentityPayload =
            response.json().await.map_err(|e| Error::AuthProvider {
                message: e.to_string(),
            })?;
        Ok(payload.id)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.auth_url(&format!("admin/users/{user_id}")))
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .send()
            .await
            .map_err(|e| Error::AuthProvider {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Error::AuthProvider {
                message: format!("delete_user returned {}", response.status()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_identity_error_classes() {
        assert!(matches!(
            map_identity_error("A user with this email address has already been registered"),
            Error::DuplicateEmail
        ));
        assert!(matches!(
            map_identity_error("duplicate key value violates unique constraint"),
            Error::DuplicateEmail
        ));
        assert!(matches!(
            map_identity_error("Unable to validate email address: invalid email format"),
            Error::InvalidEmail
        ));
        assert!(matches!(
            map_identity_error("Password should be at least 6 characters"),
            Error::WeakPassword { .. }
        ));
        assert!(matches!(
            map_identity_error("something unexpected"),
            Error::AuthProvider { .. }
        ));
    }
}
