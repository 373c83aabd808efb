//! Live server tests
//!
//! Require a running server and a database seeded with user 1 and book 258027.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_reservation_lifecycle() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .json(&json!({
            "user_id": 1,
            "book_external_id": 258027,
            "rental_days": 5,
            "start_date": "2024-05-20"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().expect("No reservation ID");
    assert_eq!(created["status"], "ACTIVE");

    let response = client
        .get(format!("{}/reservations/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/reservations/{}/return", BASE_URL, id))
        .json(&json!({ "return_date": "2024-05-28" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let returned: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(returned["status"], "RETURNED");
    assert!(returned["late_fee"].is_string());

    // Second return is refused
    let response = client
        .post(format!("{}/reservations/{}/return", BASE_URL, id))
        .json(&json!({ "return_date": "2024-05-29" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_list_active_reservations() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reservations/active", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body.as_array().expect("Expected an array");
    assert!(items.iter().all(|r| r["status"] == "ACTIVE"));
}

#[tokio::test]
#[ignore]
async fn test_unknown_reservation() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reservations/{}", BASE_URL, i64::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
