//! Public catalogue handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use common::model::listing::Listing;
use installment::QuoteSummary;
use listing_service::ListingQuery;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::response::{ApiListResponse, ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::AppState;

/// Search the catalogue
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(
        ("location" = Option<String>, Query, description = "Text matched against title, location and address"),
        ("property_type" = Option<String>, Query, description = "Type label or slug, e.g. Luxury or residential; any for all types"),
        ("status" = Option<String>, Query, description = "Status label or slug, e.g. For Rent or for-rent; any for all statuses"),
        ("min_beds" = Option<u32>, Query, description = "Minimum bedrooms"),
        ("min_baths" = Option<f64>, Query, description = "Minimum bathrooms, in half steps"),
        ("min_sqft" = Option<u32>, Query, description = "Minimum floor area"),
        ("min_price" = Option<String>, Query, description = "Lowest price, inclusive"),
        ("max_price" = Option<String>, Query, description = "Highest price, inclusive"),
        ("featured" = Option<bool>, Query, description = "Only featured (or only non-featured) listings"),
        ("sort" = Option<String>, Query, description = "featured, price-high, price-low or newest"),
        ("page" = Option<usize>, Query, description = "Page number, starting at 1"),
        ("per_page" = Option<usize>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "One page of matching listings"),
        (status = 400, description = "Invalid filter")
    ),
    tag = "listings"
)]
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> Result<PaginatedResponse<Listing>, ApiError> {
    let result = state.listing_service.search(&query).await?;
    Ok(PaginatedResponse::new(result.items, result.page, result.per_page, result.total))
}

/// Listings for the home page carousel
#[utoipa::path(
    get,
    path = "/api/v1/listings/featured",
    responses(
        (status = 200, description = "Featured listings")
    ),
    tag = "listings"
)]
pub async fn featured_listings(
    State(state): State<Arc<AppState>>,
) -> Result<ApiListResponse<Listing>, ApiError> {
    let listings = state.listing_service.featured_listings().await?;
    Ok(ApiListResponse::new(listings))
}

/// Get a listing by ID
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = i64, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing details", body = Listing),
        (status = 404, description = "Listing not found")
    ),
    tag = "listings"
)]
pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Listing>, ApiError> {
    let listing = state.listing_service.require_listing(id).await?;
    Ok(ApiResponse::new(listing))
}

/// Loan term chosen in the calculator
#[derive(Debug, Deserialize, IntoParams)]
pub struct TermQuery {
    /// Months, clamped to the offered range
    pub term: Option<i64>,
}

/// Installment quote seeded from a listing's price
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}/quote",
    params(
        ("id" = i64, Path, description = "Listing ID"),
        TermQuery
    ),
    responses(
        (status = 200, description = "Formatted installment quote", body = QuoteSummary),
        (status = 404, description = "Listing not found")
    ),
    tag = "quotes"
)]
pub async fn listing_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<TermQuery>,
) -> Result<ApiResponse<QuoteSummary>, ApiError> {
    let quote = state.listing_service.quote_for_listing(id, query.term).await?;
    Ok(ApiResponse::with_extra(
        quote.summary(&state.currency),
        serde_json::json!({ "currency": state.currency.code, "listingId": id }),
    ))
}
