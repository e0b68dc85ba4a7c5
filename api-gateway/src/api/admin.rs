//! Admin dashboard handlers
//!
//! Every handler here takes an [`AdminSession`], so requests without a live
//! bearer session never reach the services.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use backoffice::DashboardStats;
use common::model::appointment::Appointment;
use common::model::inquiry::Inquiry;
use common::model::listing::{Listing, NewListing};
use listing_service::ImportReport;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::auth::AdminSession;
use crate::api::response::{ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::AppState;

/// Add a listing
#[utoipa::path(
    post,
    path = "/api/v1/admin/listings",
    request_body = NewListing,
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Missing title or price"),
        (status = 401, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Json(listing): Json<NewListing>,
) -> Result<(StatusCode, ApiResponse<Listing>), ApiError> {
    let listing = state.listing_service.create_listing(listing).await?;
    info!("{} created listing {}", session.email, listing.id);
    Ok((StatusCode::CREATED, ApiResponse::new(listing)))
}

/// Replace a listing's details
#[utoipa::path(
    put,
    path = "/api/v1/admin/listings/{id}",
    params(
        ("id" = i64, Path, description = "Listing ID")
    ),
    request_body = NewListing,
    responses(
        (status = 200, description = "Listing updated", body = Listing),
        (status = 400, description = "Missing title or price"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Listing not found")
    ),
    tag = "admin"
)]
pub async fn update_listing(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<i64>,
    Json(listing): Json<NewListing>,
) -> Result<ApiResponse<Listing>, ApiError> {
    let listing = state.listing_service.update_listing(id, listing).await?;
    Ok(ApiResponse::new(listing))
}

/// Remove a listing
#[utoipa::path(
    delete,
    path = "/api/v1/admin/listings/{id}",
    params(
        ("id" = i64, Path, description = "Listing ID")
    ),
    responses(
        (status = 204, description = "Listing removed"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Listing not found")
    ),
    tag = "admin"
)]
pub async fn delete_listing(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.listing_service.delete_listing(id).await?;
    info!("{} deleted listing {}", session.email, id);
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk import listings from a CSV document sent as the request body
#[utoipa::path(
    post,
    path = "/api/v1/admin/listings/import",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import finished, see the report for skipped rows", body = ImportReport),
        (status = 400, description = "Empty or unreadable CSV"),
        (status = 401, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn import_listings(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    body: String,
) -> Result<ApiResponse<ImportReport>, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("CSV body is empty".to_string()));
    }

    let report = state.listing_service.import_csv(body.as_bytes()).await?;
    Ok(ApiResponse::new(report))
}

/// Inquiry inbox
#[utoipa::path(
    get,
    path = "/api/v1/admin/inquiries",
    responses(
        (status = 200, description = "All inquiries"),
        (status = 401, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn list_inquiries(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> Result<ApiListResponse<Inquiry>, ApiError> {
    let inquiries = state.inquiry_service.list().await?;
    Ok(ApiListResponse::new(inquiries))
}

/// One inquiry
#[utoipa::path(
    get,
    path = "/api/v1/admin/inquiries/{id}",
    params(
        ("id" = i64, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 200, description = "Inquiry found", body = Inquiry),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Inquiry not found")
    ),
    tag = "admin"
)]
pub async fn get_inquiry(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Inquiry>, ApiError> {
    let inquiry = state.inquiry_service.get(id).await?;
    Ok(ApiResponse::new(inquiry))
}

/// Mark an inquiry as resolved
#[utoipa::path(
    post,
    path = "/api/v1/admin/inquiries/{id}/resolve",
    params(
        ("id" = i64, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 200, description = "Inquiry resolved", body = Inquiry),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Inquiry not found")
    ),
    tag = "admin"
)]
pub async fn resolve_inquiry(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Inquiry>, ApiError> {
    let inquiry = state.inquiry_service.mark_resolved(id).await?;
    Ok(ApiResponse::new(inquiry))
}

/// Reply to an inquiry
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReplyRequest {
    #[serde(default)]
    pub message: String,
}

/// Record a reply to an inquiry
#[utoipa::path(
    post,
    path = "/api/v1/admin/inquiries/{id}/reply",
    params(
        ("id" = i64, Path, description = "Inquiry ID")
    ),
    request_body = ReplyRequest,
    responses(
        (status = 200, description = "Reply recorded", body = Inquiry),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Inquiry not found")
    ),
    tag = "admin"
)]
pub async fn reply_inquiry(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<i64>,
    Json(reply): Json<ReplyRequest>,
) -> Result<ApiResponse<Inquiry>, ApiError> {
    let inquiry = state.inquiry_service.record_reply(id, &reply.message).await?;
    Ok(ApiResponse::new(inquiry))
}

/// Appointment calendar
#[utoipa::path(
    get,
    path = "/api/v1/admin/appointments",
    responses(
        (status = 200, description = "Appointments, earliest first"),
        (status = 401, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> Result<ApiListResponse<Appointment>, ApiError> {
    let appointments = state.appointment_service.list().await?;
    Ok(ApiListResponse::new(appointments))
}

/// One appointment
#[utoipa::path(
    get,
    path = "/api/v1/admin/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment found", body = Appointment),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "admin"
)]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Appointment>, ApiError> {
    let appointment = state.appointment_service.get(id).await?;
    Ok(ApiResponse::new(appointment))
}

/// Dashboard overview figures
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardStats),
        (status = 401, description = "Not signed in")
    ),
    tag = "admin"
)]
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> Result<ApiResponse<DashboardStats>, ApiError> {
    let listings = state.listing_service.all_listings().await?;
    let inquiries = state.inquiry_service.list().await?;
    Ok(ApiResponse::new(DashboardStats::compute(&listings, &inquiries)))
}
