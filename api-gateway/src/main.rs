//! API Gateway for the brokerage back end

use std::net::SocketAddr;
use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};
use backoffice::{AppointmentService, InMemorySessionProvider, InquiryService, WebhookNotifier};
use clap::Parser;
use dotenv::dotenv;
use listing_service::ListingService;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Brokerage API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to 127.0.0.1 on PORT)
    #[clap(short, long)]
    addr: Option<String>,

    /// Database URL; listings stay in memory without one
    #[clap(short, long)]
    database_url: Option<String>,

    /// Load the demo catalogue, inquiries and appointments on start
    #[clap(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse_lossy("tower_http=debug,api_gateway=debug");

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    debug!("Debug logging enabled");

    // Initialize services
    let mut config = AppConfig::from_env();
    if args.database_url.is_some() {
        config.listings.database_url = args.database_url;
    }

    let listing_service = Arc::new(ListingService::with_config(&config.listings).await?);
    let (inquiry_service, mut appointment_service) = if args.seed {
        (InquiryService::with_samples(), AppointmentService::with_samples())
    } else {
        (InquiryService::new(), AppointmentService::new())
    };
    if let Some(url) = &config.appointment_webhook_url {
        info!("Relaying viewing requests to {}", url);
        appointment_service = appointment_service.with_notifier(Arc::new(WebhookNotifier::new(url.as_str())));
    }

    if args.seed {
        if listing_service.all_listings().await?.is_empty() {
            listing_service.seed(listing_service::sample::sample_listings()).await?;
        } else {
            warn!("Listing store is not empty, skipping demo listings");
        }
    }

    // Create app state
    let state = Arc::new(AppState {
        listing_service,
        inquiry_service: Arc::new(inquiry_service),
        appointment_service: Arc::new(appointment_service),
        sessions: Arc::new(InMemorySessionProvider::new(config.auth.clone())),
        currency: config.currency,
    });

    let app = app(state, log_level);

    // Start the server
    let addr: SocketAddr = args
        .addr
        .unwrap_or_else(|| format!("127.0.0.1:{}", config.port))
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
