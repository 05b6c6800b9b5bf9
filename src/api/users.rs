//! User creation route.
//!
//! `POST /api/admin/users` with `{display_name, email, password}`. The
//! identity lives in the hosted auth service and the profile row lives in
//! our database; the two writes are not atomic across stores, so a failed
//! profile write triggers a compensating identity delete. The compensation
//! is best-effort: its own failure is logged and the original error is
//! still returned.

use super::{AppState, parse_bearer_token};
use crate::{auth, core::admin, entities::user_profile, errors::Error};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Request body for the create-user route.
#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    /// Name shown in activity feeds
    pub display_name: Option<String>,
    /// Login email
    pub email: Option<String>,
    /// Initial password
    pub password: Option<String>,
}

/// Error codes returned by the create-user route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateUserErrorCode {
    Unauthorized,
    Forbidden,
    MissingFields,
    InvalidPayload,
    DuplicateEmail,
    InvalidEmail,
    WeakPassword,
    CreateUserFailed,
    ProfileUpsertFailed,
    ServerError,
    ServerMisconfigured,
}

/// Response body for the create-user route.
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    /// True on success
    pub ok: bool,
    /// Identity id of the created user on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Error code when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CreateUserErrorCode>,
}

type CreateUserResult = (StatusCode, Json<CreateUserResponse>);

fn failure(status: StatusCode, code: CreateUserErrorCode) -> CreateUserResult {
    (
        status,
        Json(CreateUserResponse {
            ok: false,
            user_id: None,
            error: Some(code),
        }),
    )
}

fn map_create_error(e: &Error) -> CreateUserResult {
    let code = match e {
        Error::DuplicateEmail => CreateUserErrorCode::DuplicateEmail,
        Error::InvalidEmail => CreateUserErrorCode::InvalidEmail,
        Error::WeakPassword { .. } => CreateUserErrorCode::WeakPassword,
        _ => CreateUserErrorCode::CreateUserFailed,
    };
    failure(StatusCode::BAD_REQUEST, code)
}

/// Handles `POST /api/admin/users`.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> CreateUserResult {
    let Some(auth_provider) = &state.auth else {
        error!("Admin API called without platform configuration");
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            CreateUserErrorCode::ServerMisconfigured,
        );
    };

    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some(access_token) = parse_bearer_token(header_value) else {
        return failure(StatusCode::UNAUTHORIZED, CreateUserErrorCode::Unauthorized);
    };

    let requester_id = match auth_provider.verify_token(access_token).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to verify requester: {e}");
            return failure(StatusCode::UNAUTHORIZED, CreateUserErrorCode::Unauthorized);
        }
    };

    let profile = match auth::fetch_profile(&state.db, &requester_id).await {
        Ok(profile) => profile,
        Err(e) => {
            error!("Failed to fetch requester profile: {e}");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                CreateUserErrorCode::ServerError,
            );
        }
    };
    let is_admin = profile
        .as_ref()
        .is_some_and(|p| p.active && p.role == user_profile::ROLE_ADMIN);
    if !is_admin {
        return failure(StatusCode::FORBIDDEN, CreateUserErrorCode::Forbidden);
    }

    let payload: CreateUserPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Invalid payload: {e}");
            return failure(StatusCode::BAD_REQUEST, CreateUserErrorCode::InvalidPayload);
        }
    };

    let display_name = payload
        .display_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    if display_name.is_empty() || email.is_empty() || password.is_empty() {
        return failure(StatusCode::BAD_REQUEST, CreateUserErrorCode::MissingFields);
    }

    let new_user_id = match auth_provider.create_user(&email, password).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to create auth user: {e}");
            return map_create_error(&e);
        }
    };

    if let Err(e) = admin::create_profile(&state.db, &new_user_id, display_name).await {
        error!("Failed to upsert user profile: {e}");
        // The identity exists but the profile does not; undo the identity
        // so the same email can be retried.
        if let Err(rollback) = auth_provider.delete_user(&new_user_id).await {
            error!("Failed to rollback auth user {new_user_id}: {rollback}");
        }
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            CreateUserErrorCode::ProfileUpsertFailed,
        );
    }

    (
        StatusCode::OK,
        Json(CreateUserResponse {
            ok: true,
            user_id: Some(new_user_id),
            error: None,
        }),
    )
}
