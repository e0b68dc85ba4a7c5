//! Error types for the brokerage back end
//!
//! This module provides a unified error handling system for all crates in the
//! workspace. It defines standard error types that can be used across service
//! boundaries and provides consistent error conversion.

use std::fmt::Display;
use thiserror::Error;

/// Brokerage error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error when a listing cannot be found
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    /// Error when an inquiry cannot be found
    #[error("Inquiry not found: {0}")]
    InquiryNotFound(String),

    /// Error when an appointment cannot be found
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Authorization error
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Bulk import error
    #[error("Import error: {0}")]
    Import(String),

    /// Outbound notification could not be delivered
    #[error("Notification error: {0}")]
    Notification(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::ListingNotFound(msg) => Error::ListingNotFound(format!("{}: {}", context, msg)),
                Error::InquiryNotFound(msg) => Error::InquiryNotFound(format!("{}: {}", context, msg)),
                Error::AppointmentNotFound(msg) => Error::AppointmentNotFound(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::AuthorizationError(msg) => Error::AuthorizationError(format!("{}: {}", context, msg)),
                Error::Import(msg) => Error::Import(format!("{}: {}", context, msg)),
                Error::Notification(msg) => Error::Notification(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Database(e) => Error::Database(e),
                Error::Migration(e) => Error::Migration(e),
                Error::Csv(e) => Error::Csv(e),
            }
        })
    }
}
