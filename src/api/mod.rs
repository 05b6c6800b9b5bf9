//! Admin HTTP API - the one outward network surface this service owns.
//!
//! Two POST routes, both bearer-token authenticated and admin-gated:
//! product hard delete and user creation. Everything else in the system is
//! reached through the core modules directly. When the hosted-platform
//! collaborators are not configured the routes answer
//! `server_misconfigured` instead of refusing to start.

use crate::{auth::AuthProvider, cache::ExpiryDaysCache, storage::BlobStore};
use axum::{Router, routing::post};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Product hard-delete route
pub mod products;
/// User creation route
pub mod users;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// Application database
    pub db: Arc<DatabaseConnection>,
    /// Hosted auth collaborator; None means misconfigured
    pub auth: Option<Arc<dyn AuthProvider>>,
    /// Hosted blob storage collaborator; None means misconfigured
    pub storage: Option<Arc<dyn BlobStore>>,
    /// Read-through cache for the expiry-warning threshold
    pub expiry_cache: ExpiryDaysCache,
}

/// Builds the admin API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/admin/products/delete",
            post(products::delete_product),
        )
        .route("/api/admin/users", post(users::create_user))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn parse_bearer_token(header_value: Option<&str>) -> Option<&str> {
    let token = header_value?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_token() {
        assert_eq!(parse_bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(parse_bearer_token(Some("Bearer  abc ")), Some("abc"));
        assert_eq!(parse_bearer_token(Some("Bearer ")), None);
        assert_eq!(parse_bearer_token(Some("Basic abc")), None);
        assert_eq!(parse_bearer_token(Some("bearer abc")), None);
        assert_eq!(parse_bearer_token(None), None);
    }
}
