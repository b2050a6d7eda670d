//! integration tests for the loan submit endpoint
//!
//! the submit endpoint reconciles the customer on its id-card number and
//! records a new submission bound to the resolved customer.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use alphaloan::create_app;
use alphaloan_db::AlphaloanDb;
use alphaloan_types::Config;

async fn test_app() -> Router {
    let db = AlphaloanDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    create_app(db, Config::default())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse response")
}

fn submit_request(id_card_number: &str, full_name: &str) -> Value {
    json!({
        "customer": {
            "id_card_number": id_card_number,
            "full_name": full_name,
            "birth_date": "1990-04-12",
            "phone_number": "+62811234567",
            "email": "jane@example.com",
            "monthly_income": 5250.75,
            "address_street": "12 Merdeka St",
            "address_city": "Jakarta"
        },
        "proposed_loan": {
            "vehicle_type": "car",
            "vehicle_brand": "Toyota",
            "vehicle_model": "Avanza",
            "vehicle_license_number": "B 1234 XYZ",
            "vehicle_odometer": 42000,
            "manufacturing_year": 2019,
            "proposed_loan_amount": 10000,
            "proposed_loan_tenure_month": 24,
            "is_commercial_vehicle": false
        }
    })
}

#[tokio::test]
async fn test_submit_returns_both_identifiers() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json("/api/loan/submit", &submit_request("A1", "Jane")))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["customer_id"].is_string());
    assert!(body["submission_id"].is_string());
}

#[tokio::test]
async fn test_resubmit_same_id_card_reuses_customer() {
    let app = test_app().await;

    let first = app
        .clone()
        .oneshot(post_json("/api/loan/submit", &submit_request("A1", "Jane")))
        .await
        .expect("request failed");
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;

    // same id-card number, changed name
    let second = app
        .clone()
        .oneshot(post_json(
            "/api/loan/submit",
            &submit_request("A1", "Jane Smith"),
        ))
        .await
        .expect("request failed");
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    // stable customer identifier, fresh submission identifier
    assert_eq!(second["customer_id"], first["customer_id"]);
    assert_ne!(second["submission_id"], first["submission_id"]);

    // one customer row with the latest name
    let customers = app
        .clone()
        .oneshot(get("/api/loan/customers"))
        .await
        .expect("request failed");
    assert_eq!(customers.status(), StatusCode::OK);
    let customers = body_json(customers).await;
    let data = customers["data"].as_array().expect("data should be array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["full_name"], "Jane Smith");

    // both submissions under the customer
    let info_uri = format!(
        "/api/loan/customer/{}/info",
        first["customer_id"].as_str().unwrap()
    );
    let info = app.oneshot(get(&info_uri)).await.expect("request failed");
    assert_eq!(info.status(), StatusCode::OK);
    let info = body_json(info).await;
    let submissions = info["data"]["loan_submissions"]
        .as_array()
        .expect("loan_submissions should be array");
    assert_eq!(submissions.len(), 2);
}

#[tokio::test]
async fn test_submit_rejects_missing_id_card_number() {
    let app = test_app().await;

    let mut body = submit_request("", "Jane");
    body["customer"]["id_card_number"] = json!("");

    let response = app
        .oneshot(post_json("/api/loan/submit", &body))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error_message"].is_string());
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_submit_reports_absent_required_fields_by_name() {
    let app = test_app().await;

    // id_card_number omitted entirely, not just empty
    let mut body = submit_request("A1", "Jane");
    body["customer"]
        .as_object_mut()
        .unwrap()
        .remove("id_card_number");
    let response = app
        .clone()
        .oneshot(post_json("/api/loan/submit", &body))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_message"], "Missing customer id_card_number");

    let mut body = submit_request("A1", "Jane");
    body["customer"].as_object_mut().unwrap().remove("full_name");
    let response = app
        .oneshot(post_json("/api/loan/submit", &body))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_message"], "Missing customer full_name");
}

#[tokio::test]
async fn test_submit_rejects_malformed_body() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/loan/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("failed to build request");

    let response = app.oneshot(request).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_message"], "Bad request body");
}

#[tokio::test]
async fn test_submit_rejects_wrong_method() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/loan/submit"))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
