use std::sync::Arc;

use api_gateway::{app, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use backoffice::{AppointmentService, AuthConfig, InMemorySessionProvider, InquiryService};
use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use common::decimal::CurrencyFormat;
use listing_service::ListingService;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::Level;

const ADMIN_EMAIL: &str = "admin@realty.ng";
const ADMIN_PASSWORD: &str = "correct horse";

async fn test_app() -> Router {
    let listing_service = ListingService::new();
    listing_service.seed(listing_service::sample::sample_listings()).await.unwrap();

    let state = Arc::new(AppState {
        listing_service: Arc::new(listing_service),
        inquiry_service: Arc::new(InquiryService::with_samples()),
        appointment_service: Arc::new(AppointmentService::with_samples()),
        sessions: Arc::new(InMemorySessionProvider::new(AuthConfig::new(ADMIN_EMAIL, ADMIN_PASSWORD, 60))),
        currency: CurrencyFormat::NAIRA,
    });
    app(state, Level::DEBUG)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn status_of(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

/// First weekday at least a week from now
fn upcoming_weekday() -> NaiveDate {
    let mut day = Utc::now().date_naive().checked_add_days(Days::new(7)).unwrap();
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day = day.succ_opt().unwrap();
    }
    day
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn sign_in(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/auth/sign-in",
            None,
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_list_listings_paginated() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/listings?per_page=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 4);
    assert_eq!(body["pagination"]["total_pages"], 2);
    // Featured first
    assert_eq!(body["data"][0]["featured"], true);
    assert_eq!(body["data"][1]["featured"], true);
}

#[tokio::test]
async fn test_list_listings_filters() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/listings?location=abuja")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Contemporary Townhouse");
    assert_eq!(body["data"][0]["type"], "Townhouse");
    assert_eq!(body["data"][0]["status"], "New Construction");

    let (_, body) = send(&app, get("/api/v1/listings?status=for-rent")).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Downtown Penthouse");

    let (_, body) = send(&app, get("/api/v1/listings?sort=price-high&per_page=1")).await;
    assert_eq!(body["data"][0]["title"], "Waterfront Estate");
}

#[tokio::test]
async fn test_listing_filters_accept_labels_and_slugs() {
    let app = test_app().await;

    for uri in [
        "/api/v1/listings?property_type=luxury",
        "/api/v1/listings?property_type=Luxury",
        "/api/v1/listings?property_type=LUXURY&status=for-sale",
        "/api/v1/listings?property_type=luxury&status=For%20Sale",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["pagination"]["total"], 2, "{}", uri);
    }

    let (_, body) = send(&app, get("/api/v1/listings?status=new-construction")).await;
    assert_eq!(body["data"][0]["title"], "Contemporary Townhouse");

    let (status, body) = send(&app, get("/api/v1/listings?property_type=any&status=Any")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 4);

    let (_, body) = send(&app, get("/api/v1/listings?property_type=&status=")).await;
    assert_eq!(body["pagination"]["total"], 4);

    assert_eq!(status_of(&app, get("/api/v1/listings?property_type=castle")).await, StatusCode::BAD_REQUEST);
    assert_eq!(status_of(&app, get("/api/v1/listings?status=auction")).await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_half_baths_in_catalogue() {
    let app = test_app().await;

    let (_, body) = send(&app, get("/api/v1/listings/2")).await;
    assert_eq!(body["data"]["baths"], 3.5);

    let (_, body) = send(&app, get("/api/v1/listings?min_baths=3.5&sort=newest")).await;
    assert_eq!(body["pagination"]["total"], 4);

    let (_, body) = send(&app, get("/api/v1/listings?min_baths=4")).await;
    assert_eq!(body["pagination"]["total"], 3);
    assert!(body["data"].as_array().unwrap().iter().all(|l| l["title"] != "Downtown Penthouse"));
}

#[tokio::test]
async fn test_featured_and_single_listing() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/listings/featured")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, get("/api/v1/listings/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Modern Luxury Villa");
    assert_eq!(body["data"]["yearBuilt"], 2021);

    let (status, body) = send(&app, get("/api/v1/listings/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "listing_not_found");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_listing_quote() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/listings/1/quote")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "₦450,000,000");
    assert_eq!(body["data"]["downPayment"], "₦135,000,000");
    assert_eq!(body["data"]["loanAmount"], "₦315,000,000");
    assert_eq!(body["data"]["termMonths"], 12);
    assert_eq!(body["data"]["rate"], "5.5%");
    assert_eq!(body["meta"]["currency"], "NGN");
    assert_eq!(body["meta"]["listingId"], 1);

    let (_, body) = send(&app, get("/api/v1/listings/1/quote?term=48")).await;
    assert_eq!(body["data"]["termMonths"], 12);

    let (_, body) = send(&app, get("/api/v1/listings/1/quote?term=1")).await;
    assert_eq!(body["data"]["termMonths"], 6);
}

#[tokio::test]
async fn test_standalone_quote() {
    let app = test_app().await;

    // "₦10,000,000" percent-encoded
    let (status, body) = send(&app, get("/api/v1/quote?price=%E2%82%A610%2C000%2C000&term=12")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["downPayment"], "₦3,000,000");
    assert_eq!(body["data"]["loanAmount"], "₦7,000,000");
    assert_eq!(body["data"]["monthlyPayment"], "₦600,857");

    let (status, body) = send(&app, get("/api/v1/quote?price=call%20us")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "₦0");
    assert_eq!(body["data"]["monthlyPayment"], "₦0");
}

#[tokio::test]
async fn test_request_appointment() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/appointments",
            None,
            json!({
                "name": "Chidi Obi",
                "email": "chidi@example.com",
                "phone": "0803 000 0000",
                "propertyInterest": "Waterfront Estate",
                "date": upcoming_weekday().to_string(),
                "timeSlot": "3:00 pm"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Property Viewing");
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["time"], "3:00 PM");

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/appointments", None, json!({ "name": "Chidi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_appointment_date_and_slot_rules() {
    let app = test_app().await;
    let mut saturday = upcoming_weekday();
    while saturday.weekday() != Weekday::Sat {
        saturday = saturday.succ_opt().unwrap();
    }
    let yesterday = Utc::now().date_naive().pred_opt().unwrap();

    for (date, slot) in [
        (yesterday, "10:00 AM"),
        (saturday, "10:00 AM"),
        (upcoming_weekday(), "12:00 PM"),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/appointments",
                None,
                json!({
                    "name": "Chidi Obi",
                    "email": "chidi@example.com",
                    "phone": "0803 000 0000",
                    "date": date.to_string(),
                    "timeSlot": slot
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", date, slot);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    let token = sign_in(&app).await;
    let (_, body) = send(&app, authed(Method::GET, "/api/v1/admin/appointments", &token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_inquiry() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/inquiries",
            None,
            json!({ "name": "Ngozi", "email": "ngozi@example.com", "property": "Downtown Penthouse" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "New");
    assert_eq!(body["data"]["id"], 5);
}

#[tokio::test]
async fn test_admin_requires_session() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/admin/stats")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");

    let (status, _) = send(&app, authed(Method::GET, "/api/v1/admin/stats", "not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        authed(Method::GET, "/api/v1/admin/stats", "6f1c1a52-5c55-4a8b-9d4e-0b1a3f1c2d3e"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_rejects_bad_password() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/auth/sign-in",
            None,
            json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "authorization_error");
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, _) = send(&app, authed(Method::GET, "/api/v1/admin/stats", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, authed(Method::POST, "/api/v1/auth/sign-out", &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, authed(Method::GET, "/api/v1/admin/stats", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_listing_lifecycle() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/admin/listings",
            Some(&token),
            json!({
                "title": "Garden Duplex",
                "price": "₦85,000,000",
                "location": "Ikeja, Lagos",
                "type": "Townhouse",
                "status": "For Sale",
                "beds": 4,
                "featured": true
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 5);
    assert_eq!(body["data"]["baths"], 0.0);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/admin/listings/5",
            Some(&token),
            json!({ "title": "Garden Duplex", "price": "₦80,000,000", "status": "Pending" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "₦80,000,000");
    assert_eq!(body["data"]["status"], "Pending");

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/admin/listings", Some(&token), json!({ "title": "", "price": "₦1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = send(&app, authed(Method::DELETE, "/api/v1/admin/listings/5", &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, authed(Method::DELETE, "/api/v1/admin/listings/5", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_listing_types_from_the_form() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/admin/listings",
            Some(&token),
            json!({
                "title": "Harbour Office",
                "price": "₦12,000,000/yr",
                "location": "Victoria Island, Lagos",
                "type": "commercial",
                "status": "leased",
                "baths": 2.5
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "Commercial");
    assert_eq!(body["data"]["status"], "Leased");
    assert_eq!(body["data"]["baths"], 2.5);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/admin/listings",
            Some(&token),
            json!({ "title": "Bare", "price": "₦1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "Residential");
    assert_eq!(body["data"]["status"], "For Sale");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/admin/listings",
            Some(&token),
            json!({ "title": "Odd", "price": "₦1", "baths": 1.25 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (_, body) = send(&app, authed(Method::GET, "/api/v1/admin/stats", &token)).await;
    assert_eq!(body["data"]["totalListings"], 6);
    assert_eq!(body["data"]["activeListings"], 4);
}

#[tokio::test]
async fn test_admin_csv_import() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let csv = "title,price,type,status\nBeach Plot,\"₦30,000,000\",Land,For Sale\n,,,\nCastle,\"₦1\",Castle,\n";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/listings/import")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from(csv))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imported"], 1);
    assert_eq!(body["data"]["skipped"], 2);
    assert_eq!(body["data"]["errors"][0]["line"], 4);

    let (_, body) = send(&app, get("/api/v1/listings?property_type=Land")).await;
    assert_eq!(body["data"][0]["title"], "Beach Plot");

    let empty = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/listings/import")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, empty).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_admin_inquiries() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/inquiries", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = send(&app, authed(Method::POST, "/api/v1/admin/inquiries/1/resolve", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Resolved");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/admin/inquiries/2/reply",
            Some(&token),
            json!({ "message": "The penthouse is available from July." }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Contacted");

    let (status, body) = send(&app, authed(Method::POST, "/api/v1/admin/inquiries/77/resolve", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "inquiry_not_found");
}

#[tokio::test]
async fn test_admin_single_records() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/inquiries/1", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "John Doe");
    assert_eq!(body["data"]["property"], "Modern Luxury Villa");

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/appointments/2", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Contract Signing");
    assert_eq!(body["data"]["time"], "2:30 PM");

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/inquiries/77", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "inquiry_not_found");

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/appointments/77", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "appointment_not_found");

    let (status, _) = send(&app, get("/api/v1/admin/inquiries/1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_appointments_and_stats() {
    let app = test_app().await;
    let token = sign_in(&app).await;

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/appointments", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["date"], "2023-06-18");
    assert_eq!(body["data"][2]["title"], "Property Inspection");

    send(&app, authed(Method::POST, "/api/v1/admin/inquiries/3/resolve", &token)).await;

    let (status, body) = send(&app, authed(Method::GET, "/api/v1/admin/stats", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "totalListings": 4,
            "activeListings": 3,
            "featuredListings": 2,
            "totalInquiries": 4,
            "openInquiries": 3
        })
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/listings/{id}/quote"].is_object());
    assert!(body["paths"]["/api/v1/admin/stats"].is_object());
}
