//! Product hard-delete route.
//!
//! `POST /api/admin/products/delete` with `{product_id, confirm_name}`.
//! The photo object is removed from storage before the database delete, and
//! an ambiguous photo reference aborts the whole request before anything is
//! mutated. The core delete re-validates every precondition inside its own
//! transaction; this handler's early checks exist to give the caller precise
//! error codes.

use super::{AppState, parse_bearer_token};
use crate::{
    auth,
    core::archive,
    entities::user_profile,
    errors::Error,
    storage::{PhotoPath, resolve_photo_path},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Request body for the delete route.
#[derive(Debug, Deserialize)]
pub struct DeleteProductPayload {
    /// Product to delete
    pub product_id: Option<i64>,
    /// Retyped product name
    pub confirm_name: Option<String>,
}

/// Error codes returned by the delete route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteErrorCode {
    Unauthorized,
    Forbidden,
    MissingFields,
    ProductNotFound,
    NotArchived,
    NameMismatch,
    InvalidPhotoPath,
    StorageDeleteFailed,
    DeleteFailed,
    ServerMisconfigured,
}

/// Response body for the delete route.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// True on success
    pub ok: bool,
    /// Error code when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DeleteErrorCode>,
}

type DeleteResult = (StatusCode, Json<DeleteResponse>);

fn failure(status: StatusCode, code: DeleteErrorCode) -> DeleteResult {
    (
        status,
        Json(DeleteResponse {
            ok: false,
            error: Some(code),
        }),
    )
}

fn map_delete_error(e: &Error) -> DeleteResult {
    match e {
        Error::NotAuthenticated => {
            failure(StatusCode::UNAUTHORIZED, DeleteErrorCode::Unauthorized)
        }
        Error::InactiveUser | Error::AdminOnly => {
            failure(StatusCode::FORBIDDEN, DeleteErrorCode::Forbidden)
        }
        Error::NameMismatch => failure(StatusCode::BAD_REQUEST, DeleteErrorCode::NameMismatch),
        Error::NotArchived { .. } => {
            failure(StatusCode::BAD_REQUEST, DeleteErrorCode::NotArchived)
        }
        Error::ProductNotFound { .. } => {
            failure(StatusCode::NOT_FOUND, DeleteErrorCode::ProductNotFound)
        }
        _ => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            DeleteErrorCode::DeleteFailed,
        ),
    }
}

/// Handles `POST /api/admin/products/delete`.
pub async fn delete_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> DeleteResult {
    let (Some(auth_provider), Some(storage)) = (&state.auth, &state.storage) else {
        error!("Admin API called without platform configuration");
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            DeleteErrorCode::ServerMisconfigured,
        );
    };

    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some(access_token) = parse_bearer_token(header_value) else {
        return failure(StatusCode::UNAUTHORIZED, DeleteErrorCode::Unauthorized);
    };

    let requester_id = match auth_provider.verify_token(access_token).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to verify requester: {e}");
            return failure(StatusCode::UNAUTHORIZED, DeleteErrorCode::Unauthorized);
        }
    };

    let profile = match auth::fetch_profile(&state.db, &requester_id).await {
        Ok(profile) => profile,
        Err(e) => {
            error!("Failed to fetch requester profile: {e}");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                DeleteErrorCode::DeleteFailed,
            );
        }
    };
    let Some(profile) = profile else {
        return failure(StatusCode::FORBIDDEN, DeleteErrorCode::Forbidden);
    };
    if !profile.active || profile.role != user_profile::ROLE_ADMIN {
        return failure(StatusCode::FORBIDDEN, DeleteErrorCode::Forbidden);
    }

    let payload: DeleteProductPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Invalid payload: {e}");
            return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::MissingFields);
        }
    };

    let confirm_name = payload
        .confirm_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let Some(product_id) = payload.product_id else {
        return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::MissingFields);
    };
    if confirm_name.is_empty() {
        return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::MissingFields);
    }

    let product = match crate::core::product::get_product_by_id(&state.db, product_id).await {
        Ok(product) => product,
        Err(e) => {
            error!("Failed to fetch product: {e}");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                DeleteErrorCode::DeleteFailed,
            );
        }
    };
    let Some(product) = product else {
        return failure(StatusCode::NOT_FOUND, DeleteErrorCode::ProductNotFound);
    };

    if product.active {
        return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::NotArchived);
    }

    if !archive::confirm_name_matches(confirm_name, &product.name) {
        return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::NameMismatch);
    }

    match resolve_photo_path(product.photo_ref.as_deref().unwrap_or_default()) {
        PhotoPath::Invalid => {
            return failure(StatusCode::BAD_REQUEST, DeleteErrorCode::InvalidPhotoPath);
        }
        PhotoPath::Object(key) => {
            if let Err(e) = storage.remove(&[key]).await {
                error!("Failed to remove product photo: {e}");
                return failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    DeleteErrorCode::StorageDeleteFailed,
                );
            }
        }
        PhotoPath::None | PhotoPath::External => {}
    }

    if let Err(e) = archive::delete_product(&state.db, &profile, product_id, confirm_name).await {
        error!("Failed to delete product {product_id}: {e}");
        return map_delete_error(&e);
    }

    (
        StatusCode::OK,
        Json(DeleteResponse {
            ok: true,
            error: None,
        }),
    )
}
