//! Public contact forms: viewing requests and inquiries

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use common::model::appointment::{Appointment, AppointmentRequest};
use common::model::inquiry::{Inquiry, NewInquiry};

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Request a property viewing
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Viewing booked", body = Appointment),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "contact"
)]
pub async fn request_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AppointmentRequest>,
) -> Result<(StatusCode, ApiResponse<Appointment>), ApiError> {
    let appointment = state.appointment_service.request(request).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(appointment)))
}

/// Send an inquiry about a property
#[utoipa::path(
    post,
    path = "/api/v1/inquiries",
    request_body = NewInquiry,
    responses(
        (status = 201, description = "Inquiry received", body = Inquiry),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "contact"
)]
pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(inquiry): Json<NewInquiry>,
) -> Result<(StatusCode, ApiResponse<Inquiry>), ApiError> {
    let inquiry = state.inquiry_service.create(inquiry).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(inquiry)))
}
