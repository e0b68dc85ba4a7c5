//! Stand-alone installment calculator

use std::sync::Arc;

use axum::extract::{Query, State};
use installment::{InstallmentCalculator, QuoteSummary};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Calculator inputs as typed by the user
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct QuoteQuery {
    /// Price text, e.g. "₦45,000,000"; unparseable text quotes zero
    #[serde(default)]
    pub price: String,
    /// Months, clamped to the offered range
    pub term: Option<i64>,
}

/// Quote an arbitrary price
#[utoipa::path(
    get,
    path = "/api/v1/quote",
    params(QuoteQuery),
    responses(
        (status = 200, description = "Formatted installment quote", body = QuoteSummary)
    ),
    tag = "quotes"
)]
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> Result<ApiResponse<QuoteSummary>, ApiError> {
    let policy = *state.listing_service.policy();
    let mut calculator = InstallmentCalculator::from_listing_price(&query.price, policy);
    if let Some(term) = query.term {
        calculator.set_term(term);
    }

    let summary = calculator.quote().summary(&state.currency);
    Ok(ApiResponse::with_extra(
        summary,
        serde_json::json!({ "currency": state.currency.code }),
    ))
}
