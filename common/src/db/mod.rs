use std::env;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres};

use crate::error::{Error, Result};

/// Database pool type
pub type DbPool = Pool<Postgres>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: Option<&str>, max_connections: u32) -> Result<DbPool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => env::var("DATABASE_URL")
            .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Run migrations on the database
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or_else(|| Error::ConfigurationError("Workspace root not found".to_string()))?
        .join("migrations");

    sqlx::migrate::Migrator::new(migrations_path)
        .await?
        .run(pool)
        .await?;

    Ok(())
}
