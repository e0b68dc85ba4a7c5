// api-gateway/src/lib.rs
pub mod api;
pub mod error;
pub mod config;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use backoffice::{AppointmentService, InquiryService, SessionProvider};
use common::decimal::CurrencyFormat;
use listing_service::ListingService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, contact, listing, quote};

/// App state shared across handlers
pub struct AppState {
    /// Listing catalogue and quotes
    pub listing_service: Arc<ListingService>,
    /// Client inquiry inbox
    pub inquiry_service: Arc<InquiryService>,
    /// Appointment calendar
    pub appointment_service: Arc<AppointmentService>,
    /// Admin sign-in
    pub sessions: Arc<dyn SessionProvider>,
    /// Currency used to format quotes
    pub currency: CurrencyFormat,
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Public catalogue
        api::listing::list_listings,
        api::listing::featured_listings,
        api::listing::get_listing,
        api::listing::listing_quote,
        api::quote::quote,
        // Contact forms
        api::contact::request_appointment,
        api::contact::create_inquiry,
        // Sign-in
        api::auth::sign_in,
        api::auth::sign_out,
        // Admin
        api::admin::create_listing,
        api::admin::update_listing,
        api::admin::delete_listing,
        api::admin::import_listings,
        api::admin::list_inquiries,
        api::admin::get_inquiry,
        api::admin::resolve_inquiry,
        api::admin::reply_inquiry,
        api::admin::list_appointments,
        api::admin::get_appointment,
        api::admin::dashboard_stats,
    ),
    components(
        schemas(
            // Listings
            common::model::listing::Listing,
            common::model::listing::NewListing,
            common::model::listing::Agent,
            common::model::listing::PropertyType,
            common::model::listing::ListingStatus,
            listing_service::SortOrder,
            listing_service::ImportReport,
            listing_service::RowError,

            // Quotes
            installment::Quote,
            installment::QuoteSummary,

            // Back office
            common::model::inquiry::Inquiry,
            common::model::inquiry::InquiryStatus,
            common::model::inquiry::NewInquiry,
            common::model::appointment::Appointment,
            common::model::appointment::AppointmentRequest,
            backoffice::DashboardStats,
            backoffice::Session,
            api::auth::SignInRequest,
            api::admin::ReplyRequest,

            // Response models
            api::response::PaginationMetadata
        )
    ),
    tags(
        (name = "listings", description = "Property catalogue"),
        (name = "quotes", description = "Installment calculator"),
        (name = "contact", description = "Viewing requests and inquiries"),
        (name = "auth", description = "Admin sign-in"),
        (name = "admin", description = "Admin dashboard, bearer session required")
    ),
    info(
        title = "Realty API",
        version = "1.0.0",
        description = "Property listings, installment quotes and the brokerage back office"
    )
)]
pub struct ApiDoc;

/// Build the application router with CORS, request ids, tracing and Swagger UI
pub fn app(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_routes = Router::new()
        .route("/listings", post(admin::create_listing))
        .route("/listings/import", post(admin::import_listings))
        .route("/listings/:id", put(admin::update_listing).delete(admin::delete_listing))
        .route("/inquiries", get(admin::list_inquiries))
        .route("/inquiries/:id", get(admin::get_inquiry))
        .route("/inquiries/:id/resolve", post(admin::resolve_inquiry))
        .route("/inquiries/:id/reply", post(admin::reply_inquiry))
        .route("/appointments", get(admin::list_appointments))
        .route("/appointments/:id", get(admin::get_appointment))
        .route("/stats", get(admin::dashboard_stats));

    let api_routes = Router::new()
        // Catalogue routes
        .route("/listings", get(listing::list_listings))
        .route("/listings/featured", get(listing::featured_listings))
        .route("/listings/:id", get(listing::get_listing))
        .route("/listings/:id/quote", get(listing::listing_quote))
        .route("/quote", get(quote::quote))

        // Contact routes
        .route("/appointments", post(contact::request_appointment))
        .route("/inquiries", post(contact::create_inquiry))

        // Auth routes
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .nest("/admin", admin_routes);

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
