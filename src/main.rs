//! Stockroom service entry point.

use std::sync::Arc;

use dotenvy::dotenv;
use stockroom::api::{self, AppState};
use stockroom::auth::PlatformAuth;
use stockroom::cache::ExpiryDaysCache;
use stockroom::config::{self, AppConfig};
use stockroom::core::zone;
use stockroom::errors::Result;
use stockroom::storage::PlatformStorage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = AppConfig::from_env();
    if app_config.platform.is_none() {
        warn!("Platform configuration missing; admin API will answer server_misconfigured.");
    }

    // 4. Initialize database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed the zone directory
    let zone_config = config::zones::load_default_config()?;
    zone::seed_zones(&db, &zone_config.zones).await?;
    info!("Zone directory seeded successfully.");

    // 6. Build shared state and serve the admin API
    let state = AppState {
        db: Arc::new(db),
        auth: app_config
            .platform
            .as_ref()
            .map(|p| Arc::new(PlatformAuth::new(p)) as Arc<dyn stockroom::auth::AuthProvider>),
        storage: app_config
            .platform
            .as_ref()
            .map(|p| Arc::new(PlatformStorage::new(p)) as Arc<dyn stockroom::storage::BlobStore>),
        expiry_cache: ExpiryDaysCache::new(),
    };

    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    info!("Admin API listening on {}", app_config.bind_addr);
    axum::serve(listener, api::router(state))
        .await
        .map_err(Into::into)
}
