//! Read-through cache for the expiry-warning threshold.
//!
//! The threshold changes rarely but is read by every screen that renders a
//! badge, so it is cached once per process. The cache is an explicit value
//! handed around in shared state, invalidated manually after a successful
//! write, and safe to treat as eventually consistent.

use crate::core::settings;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, trace};

/// Shared read-through cache for the expiry-warning threshold.
#[derive(Clone, Default)]
pub struct ExpiryDaysCache {
    value: Arc<RwLock<Option<i32>>>,
}

impl ExpiryDaysCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached threshold, reading it from the store on a miss.
    ///
    /// # Errors
    /// Returns an error if the miss path fails to read the store.
    pub async fn get(&self, db: &DatabaseConnection) -> Result<i32> {
        if let Some(value) = *self.value.read().await {
            trace!("Expiry warning days served from cache: {value}");
            return Ok(value);
        }

        let fetched = settings::get_expiry_warning_days(db).await?;
        *self.value.write().await = Some(fetched);
        info!("Expiry warning days cache filled with {fetched}");
        Ok(fetched)
    }

    /// Drops the cached value; the next read goes to the store.
    pub async fn invalidate(&self) {
        *self.value.write().await = None;
    }
}
