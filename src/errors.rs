//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The `Display`
//! strings of the remote-facing variants carry the exact phrases the legacy
//! backend emitted (`not authenticated`, `inactive user`, `admin only`,
//! `not archived`, `name mismatch`, `reason required`, `insufficient`,
//! `invalid days`), so callers that still match on message text keep
//! working. New callers should use [`Error::kind`] instead.

use thiserror::Error;

/// Unified error type for all stockroom operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("inactive user")]
    InactiveUser,

    #[error("admin only")]
    AdminOnly,

    #[error("cannot deactivate self")]
    SelfDeactivate,

    #[error("product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("invalid quantity: {raw:?}")]
    InvalidQuantity { raw: String },

    #[error("delta must be nonzero")]
    ZeroDelta,

    #[error("insufficient stock: {current} on hand, {requested} requested")]
    InsufficientStock { current: i32, requested: i32 },

    #[error("product not archived: {id}")]
    NotArchived { id: i64 },

    #[error("product already archived: {id}")]
    AlreadyArchived { id: i64 },

    #[error("name mismatch")]
    NameMismatch,

    #[error("reason required")]
    ReasonRequired,

    #[error("invalid days: {days}")]
    InvalidDays { days: i64 },

    #[error("invalid photo path")]
    InvalidPhotoPath,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("invalid email")]
    InvalidEmail,

    #[error("password must be at least {min_length} characters")]
    WeakPassword { min_length: u32 },

    #[error("Auth provider error: {message}")]
    AuthProvider { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("server misconfigured")]
    ServerMisconfigured,
}

/// Abstract failure classes surfaced to callers.
///
/// The class decides the user-facing behavior: forced re-login, a blocking
/// message, a field-level validation hint, or a retryable generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Session is gone; the caller must re-authenticate.
    AuthExpired,
    /// Role or activity gate failed; blocking, retry is pointless.
    PermissionDenied,
    /// Input rejected before any store mutation; field-scoped.
    ValidationFailed,
    /// The store's current state refuses the request; the caller must
    /// change the input (quantity, confirm name, target product).
    ConflictOrPrecondition,
    /// Generic network/store failure; resubmitting may succeed.
    TransientFailure,
    /// Required backend configuration is missing; non-recoverable.
    ServerMisconfigured,
}

impl Error {
    /// Maps this error onto its abstract failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthenticated => ErrorKind::AuthExpired,
            Self::InactiveUser | Self::AdminOnly | Self::SelfDeactivate => {
                ErrorKind::PermissionDenied
            }
            Self::Config { .. }
            | Self::InvalidQuantity { .. }
            | Self::ZeroDelta
            | Self::ReasonRequired
            | Self::InvalidDays { .. }
            | Self::InvalidEmail
            | Self::WeakPassword { .. } => ErrorKind::ValidationFailed,
            Self::ProductNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::InsufficientStock { .. }
            | Self::NotArchived { .. }
            | Self::AlreadyArchived { .. }
            | Self::NameMismatch
            | Self::DuplicateEmail
            | Self::InvalidPhotoPath => ErrorKind::ConflictOrPrecondition,
            Self::Database(_)
            | Self::Io(_)
            | Self::AuthProvider { .. }
            | Self::Storage { .. } => ErrorKind::TransientFailure,
            Self::ServerMisconfigured => ErrorKind::ServerMisconfigured,
        }
    }
}

/// Classifies a bare remote error message by substring matching.
///
/// Compatibility shim for callers that only have the message text of a
/// remote failure (the legacy backend returned strings, not codes). Prefer
/// [`Error::kind`] whenever a structured error is available.
#[must_use]
pub fn classify_remote_message(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();

    if lowered.contains("not authenticated") {
        return ErrorKind::AuthExpired;
    }
    if lowered.contains("admin only") || lowered.contains("inactive user") {
        return ErrorKind::PermissionDenied;
    }
    if lowered.contains("reason required") || lowered.contains("invalid days") {
        return ErrorKind::ValidationFailed;
    }
    if lowered.contains("not archived")
        || lowered.contains("name mismatch")
        || lowered.contains("not found")
        || lowered.contains("insufficient")
        || lowered.contains("negative")
        || lowered.contains("below")
        || lowered.contains("after_stock")
    {
        return ErrorKind::ConflictOrPrecondition;
    }

    ErrorKind::TransientFailure
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
