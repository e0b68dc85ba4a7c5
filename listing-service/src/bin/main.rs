use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use listing_service::{ListingService, ListingServiceConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Listing store maintenance CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Database URL (falls back to DATABASE_URL)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Database pool size
    #[arg(short, long)]
    pool_size: Option<u32>,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Import listings from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Load the demo catalogue
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("listing_service={}", cli.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env_config = ListingServiceConfig::from_env();
    let config = ListingServiceConfig::new(
        cli.database_url.or(env_config.database_url),
        cli.pool_size.unwrap_or(env_config.db_pool_size),
        true,
    );
    if config.database_url.is_none() {
        error!("A database URL is required (--database-url or DATABASE_URL)");
        return Err("missing database URL".into());
    }

    // Migrations run as part of connecting
    let service = ListingService::with_config(&config).await?;

    match cli.command {
        Commands::Migrate => {
            info!("Database is up to date");
        }
        Commands::Import { file } => {
            info!("Importing listings from {}", file.display());
            let report = service.import_csv(File::open(&file)?).await?;
            for row in &report.errors {
                error!("Line {}: {}", row.line, row.reason);
            }
            info!("Imported {} listings, skipped {}", report.imported, report.skipped);
        }
        Commands::Seed => {
            let created = service.seed(listing_service::sample::sample_listings()).await?;
            info!("Seeded {} listings", created.len());
        }
    }

    Ok(())
}
