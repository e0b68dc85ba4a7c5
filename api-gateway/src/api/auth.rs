//! Admin sign-in handlers and the bearer session extractor

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    Json,
};
use backoffice::Session;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Sign-in request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// A live admin session taken from the `Authorization: Bearer` header.
///
/// Adding this extractor to a handler rejects the request with 401 when
/// the header is missing, malformed, unknown or expired.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;
        let token = Uuid::parse_str(token)
            .map_err(|_| ApiError::Unauthorized("Malformed bearer token".to_string()))?;

        state.sessions
            .current_session(token)
            .await?
            .map(AdminSession)
            .ok_or_else(|| ApiError::Unauthorized("Session expired or unknown".to_string()))
    }
}

/// Sign in as the site administrator
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in, the token goes in the Authorization header", body = Session),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> Result<ApiResponse<Session>, ApiError> {
    let session = state.sessions.sign_in(&request.email, &request.password).await?;
    Ok(ApiResponse::new(session))
}

/// End the current admin session
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "No live session")
    ),
    tag = "auth"
)]
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
) -> Result<StatusCode, ApiError> {
    state.sessions.sign_out(session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
