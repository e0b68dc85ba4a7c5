//! Listing service for the property catalogue and its admin screens

pub mod service;
pub mod repository;
pub mod config;
pub mod search;
pub mod import;
pub mod sample;

pub use service::ListingService;
pub use service::RepositoryType;
pub use repository::{ListingRepository, InMemoryListingRepository, PostgresListingRepository};
pub use config::ListingServiceConfig;
pub use search::{ListingQuery, SearchResult, SortOrder};
pub use import::{ImportReport, RowError};
