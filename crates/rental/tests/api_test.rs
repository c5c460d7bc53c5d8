mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{GLASSES_ID, PLATES_ID, seeded_store};
use http_body_util::BodyExt;
use rental::{
    abstract_trait::notifier::DynRentalNotifier,
    di::{DependenciesInjectDeps, StorageBackend},
    handler::AppRouter,
    notifier::LoggingNotifier,
    state::AppState,
};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "back-office-secret";

async fn app() -> Router {
    let store = seeded_store().await;
    let notifier: DynRentalNotifier = Arc::new(LoggingNotifier);

    let state = AppState::new(
        DependenciesInjectDeps {
            storage: StorageBackend::Memory(store),
            notifier,
            reservation_timeout: Duration::from_secs(10),
        },
        Some(ADMIN_TOKEN.into()),
    );

    AppRouter::build(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn admin_get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap()
}

fn rental_body(product_id: i32, quantity: i32, start: &str, end: &str) -> Value {
    json!({
        "customerName": "Grace Hopper",
        "customerEmail": "grace@example.com",
        "phoneNumber": "+1 555 0100",
        "items": [{ "productId": product_id, "quantity": quantity }],
        "startDate": start,
        "endDate": end,
    })
}

#[tokio::test]
async fn product_list_is_never_cached() {
    let app = app().await;

    let response = app.clone().oneshot(get("/api/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let products: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 2);
    assert_eq!(products[0]["totalStock"], 100);
}

#[tokio::test]
async fn reservation_flow_over_http() {
    let app = app().await;

    let (status, rental) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(PLATES_ID, 30, "2030-06-01", "2030-06-03"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rental["status"], "pending");
    assert_eq!(rental["totalAmount"], 15.0);
    assert_eq!(rental["items"][0]["quantity"], 30);

    let (status, available) = send(
        &app,
        get("/api/inventory/available?startDate=2030-06-01&endDate=2030-06-03"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(available["stockByProduct"][PLATES_ID.to_string()], 70);
    assert_eq!(available["stockByProduct"][GLASSES_ID.to_string()], 100);

    let (status, error) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(PLATES_ID, 80, "2030-06-02", "2030-06-02"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], "error");
    assert_eq!(error["productId"], PLATES_ID);
}

#[tokio::test]
async fn malformed_dates_and_carts_are_bad_requests() {
    let app = app().await;

    let (status, _) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(PLATES_ID, 1, "June first", "2030-06-03"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(PLATES_ID, 1, "2030-06-05", "2030-06-01"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, error) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(PLATES_ID, 0, "2030-06-01", "2030-06-01"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("quantity"));

    let (status, _) = send(
        &app,
        post_json(
            "/api/calculate-price",
            json!({ "items": [
                { "productId": PLATES_ID, "quantity": i32::MAX },
                { "productId": PLATES_ID, "quantity": 1 },
            ] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        get("/api/inventory/daily?startDate=2030-13-01&endDate=2030-06-01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn price_preview_applies_bulk_fee() {
    let app = app().await;

    let (status, price) = send(
        &app,
        post_json(
            "/api/calculate-price",
            json!({ "items": [{ "productId": PLATES_ID, "quantity": 10 }] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(price["totalAmount"], 15.0);

    let (status, price) = send(
        &app,
        post_json(
            "/api/calculate-price",
            json!({ "items": [{ "productId": PLATES_ID, "quantity": 51 }] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(price["totalAmount"], 30.0);

    let (status, _) = send(&app, post_json("/api/calculate-price", json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn back_office_requires_the_admin_token() {
    let app = app().await;

    let (status, error) = send(&app, get("/api/rentals")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["status"], "fail");

    let wrong = Request::get("/api/impact")
        .header("x-admin-token", "guess")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, page) = send(&app, admin_get("/api/rentals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total_items"], 0);

    let (status, impact) = send(&app, admin_get("/api/impact")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(impact["rentalCount"], 0);
}

#[tokio::test]
async fn cancelling_twice_is_a_conflict() {
    let app = app().await;

    let (_, rental) = send(
        &app,
        post_json(
            "/api/rentals",
            rental_body(GLASSES_ID, 5, "2030-06-10", "2030-06-11"),
        ),
    )
    .await;
    let id = rental["id"].as_i64().unwrap();

    let cancel = || {
        Request::patch(format!("/api/rentals/{id}/status"))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-admin-token", ADMIN_TOKEN)
            .body(Body::from(json!({ "status": "cancelled" }).to_string()))
            .unwrap()
    };

    let (status, updated) = send(&app, cancel()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "cancelled");

    let (status, _) = send(&app, cancel()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, recent) = send(&app, admin_get("/api/orders/recent?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent["data"][0]["id"], id);
}

#[tokio::test]
async fn unknown_rental_is_not_found() {
    let app = app().await;

    let (status, _) = send(&app, admin_get("/api/rentals/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
