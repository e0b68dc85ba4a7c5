//! Configuration for the listing service

use std::env;

/// Configuration for the listing service
#[derive(Debug, Clone)]
pub struct ListingServiceConfig {
    /// Database URL; `None` keeps listings in memory
    pub database_url: Option<String>,
    /// Database connection pool size
    pub db_pool_size: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Default for ListingServiceConfig {
    fn default() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

impl ListingServiceConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(database_url: Option<String>, db_pool_size: u32, run_migrations: bool) -> Self {
        Self {
            database_url,
            db_pool_size,
            run_migrations,
        }
    }
}
