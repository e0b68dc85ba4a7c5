//! API handlers
//!
//! Handlers are grouped by audience: the public catalogue and contact
//! forms, the sign-in endpoints, and the admin screens behind a bearer
//! session.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod listing;
pub mod quote;
pub mod response;

pub use response::{ApiListResponse, ApiResponse, PaginatedResponse};
