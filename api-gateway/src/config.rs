//! Application configuration

use std::env;

use backoffice::AuthConfig;
use common::decimal::CurrencyFormat;
use listing_service::ListingServiceConfig;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Listing store settings, including DATABASE_URL
    pub listings: ListingServiceConfig,
    /// Admin credentials and session lifetime
    pub auth: AuthConfig,
    /// Currency used to format quotes
    pub currency: CurrencyFormat,
    /// Intake hook that receives every viewing request
    pub appointment_webhook_url: Option<String>,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn from_env() -> Self {
        let currency = match env::var("CURRENCY") {
            Ok(code) => CurrencyFormat::from_code(&code).unwrap_or_else(|| {
                warn!("Unsupported CURRENCY {}, using {}", code, CurrencyFormat::default().code);
                CurrencyFormat::default()
            }),
            Err(_) => CurrencyFormat::default(),
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            listings: ListingServiceConfig::from_env(),
            auth: AuthConfig::from_env(),
            currency,
            appointment_webhook_url: env::var("APPOINTMENT_WEBHOOK_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}
