//! Configuration management for database, collaborators, and zone seeds.

/// Database configuration and connection management
pub mod database;

/// Zone directory seeding from config.toml
pub mod zones;

/// Connection settings for the hosted auth/storage platform.
///
/// All three values come from the same project; the admin API refuses to
/// operate without them.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the hosted platform project
    pub base_url: String,
    /// Publishable key used for token verification
    pub anon_key: String,
    /// Service-role key used for identity administration and storage deletes
    pub service_role_key: String,
}

/// Top-level application configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the admin API listens on
    pub bind_addr: String,
    /// Hosted platform settings; None leaves the admin API in a
    /// `server_misconfigured` state without blocking startup
    pub platform: Option<PlatformConfig>,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// `BIND_ADDR` defaults to `0.0.0.0:3000`. The platform block requires
    /// `SUPABASE_URL`, `SUPABASE_ANON_KEY`, and `SUPABASE_SERVICE_ROLE_KEY`
    /// together; a partial set is treated as absent.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let platform = match (
            std::env::var("SUPABASE_URL"),
            std::env::var("SUPABASE_ANON_KEY"),
            std::env::var("SUPABASE_SERVICE_ROLE_KEY"),
        ) {
            (Ok(base_url), Ok(anon_key), Ok(service_role_key)) => Some(PlatformConfig {
                base_url,
                anon_key,
                service_role_key,
            }),
            _ => None,
        };

        Self {
            bind_addr,
            platform,
        }
    }
}
