//! Standardized API response formats
//!
//! Every endpoint answers with one of these envelopes so clients can read
//! `data` the same way across the catalogue and the admin screens.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

/// A standardized API response wrapper for single resource responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response data
    pub data: T,
    /// Context for the data, e.g. the currency a quote is formatted in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// A standardized API response wrapper for list/collection responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    /// The list of items
    pub data: Vec<T>,
}

/// A standardized API response wrapper for paginated list responses
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The list of items in this page
    pub data: Vec<T>,
    /// Pagination metadata
    pub pagination: PaginationMetadata,
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMetadata {
    /// The current page number (1-based)
    pub page: usize,
    /// The number of items per page
    pub per_page: usize,
    /// The total number of items
    pub total: usize,
    /// The total number of pages
    pub total_pages: usize,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> IntoResponse for ApiListResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> IntoResponse for PaginatedResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> ApiResponse<T> {
    /// Create a new API response with just data
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: None,
        }
    }

    /// Create a new API response with metadata fields
    pub fn with_extra(data: T, extra: serde_json::Value) -> Self {
        Self {
            data,
            meta: Some(extra),
        }
    }
}

impl<T> ApiListResponse<T> {
    /// Create a new list response with just data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            data,
            pagination: PaginationMetadata {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}
