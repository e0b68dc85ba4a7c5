//! Common types and utilities for the brokerage back end
//!
//! This library contains the shared types used across the workspace crates:
//! a unified error type, decimal money helpers (price parsing and currency
//! formatting), the listing and back-office domain models, and database
//! bootstrapping.

pub mod error;
pub mod model;
pub mod decimal;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
