mod common;

use axum_test::TestServer;
use records_api::routes::router;
use serde_json::{Value, json};

fn server() -> TestServer {
    TestServer::new(router(common::create_test_state())).unwrap()
}

async fn create_customer(server: &TestServer, name: &str, email: &str, code: &str) {
    server
        .post("/api/customers")
        .json(&json!({"name": name, "email": email, "code": code}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_create_customer_success() {
    let server = server();

    let response = server
        .post("/api/customers")
        .json(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "+1 555-0100",
            "code": "C-001"
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "Customer created successfully");
}

#[tokio::test]
async fn test_create_customer_missing_fields() {
    let server = server();

    let response = server
        .post("/api/customers")
        .json(&json!({"address": "1 Main St"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(
        json["error"],
        "name is required, email is required, code is required"
    );
}

#[tokio::test]
async fn test_create_customer_invalid_fields() {
    let server = server();

    let response = server
        .post("/api/customers")
        .json(&json!({"name": "Bob", "email": "not-an-email", "code": "C-002"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "email: Enter a valid email address.");
}

#[tokio::test]
async fn test_create_customer_phone_longer_than_column() {
    let server = server();

    let response = server
        .post("/api/customers")
        .json(&json!({
            "name": "Bob",
            "email": "bob@example.com",
            "phone": "+12345678901234567890",
            "code": "C-002"
        }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(
        json["error"],
        "phone: Ensure this field has no more than 20 characters."
    );
}

#[tokio::test]
async fn test_create_customer_malformed_body() {
    let server = server();

    let response = server.post("/api/customers").text("{not json").await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_customer_duplicate_email() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    let response = server
        .post("/api/customers")
        .json(&json!({"name": "Alice Two", "email": "alice@example.com", "code": "C-009"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "A Customer with this email already exists.");
}

#[tokio::test]
async fn test_create_customer_duplicate_code() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    let response = server
        .post("/api/customers")
        .json(&json!({"name": "Bob", "email": "bob@example.com", "code": "C-001"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(
        json["error"],
        "A Customer with this customer code already exists."
    );
}

#[tokio::test]
async fn test_update_customer_success() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    let response = server
        .put("/api/customers")
        .json(&json!({"id": 1, "name": "Alice Smith", "address": "2 High St"}))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "Customer updated successfully");

    let list = server.get("/api/customers").await.json::<Value>();
    assert_eq!(list["items"][0]["name"], "Alice Smith");
    assert_eq!(list["items"][0]["address"], "2 High St");
    assert_eq!(list["items"][0]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_customer_accepts_string_id() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    server
        .put("/api/customers")
        .json(&json!({"id": "1", "phone": "555 0100 22"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_customer_not_found() {
    let server = server();

    let response = server
        .put("/api/customers")
        .json(&json!({"id": 999, "name": "Nobody"}))
        .await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Customer not found");
}

#[tokio::test]
async fn test_update_customer_without_id_is_not_found() {
    let server = server();

    server
        .put("/api/customers")
        .json(&json!({"name": "Nobody"}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_customer_invalid_field() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    let response = server
        .put("/api/customers")
        .json(&json!({"id": 1, "email": "broken"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "email: Enter a valid email address.");
}

#[tokio::test]
async fn test_update_customer_conflict() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;
    create_customer(&server, "Bob", "bob@example.com", "C-002").await;

    let response = server
        .put("/api/customers")
        .json(&json!({"id": 2, "email": "alice@example.com"}))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "A Customer with this email already exists.");
}

#[tokio::test]
async fn test_list_customers_pagination() {
    let server = server();
    for i in 1..=5 {
        create_customer(
            &server,
            &format!("Customer {i}"),
            &format!("c{i}@example.com"),
            &format!("C-00{i}"),
        )
        .await;
    }

    let response = server.get("/api/customers?page=2&per_page=2").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["name"], "Customer 3");
    assert_eq!(json["page_info"]["current_page"], 2);
    assert_eq!(json["page_info"]["total_pages"], 3);
    assert_eq!(json["page_info"]["total_count"], 5);
    assert_eq!(json["page_info"]["has_next_page"], true);
    assert_eq!(json["page_info"]["has_previous_page"], true);
}

#[tokio::test]
async fn test_list_customers_page_out_of_range_returns_last_page() {
    let server = server();
    for i in 1..=3 {
        create_customer(
            &server,
            &format!("Customer {i}"),
            &format!("c{i}@example.com"),
            &format!("C-00{i}"),
        )
        .await;
    }

    let response = server.get("/api/customers?page=50&per_page=2").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["page_info"]["current_page"], 2);
    assert_eq!(json["page_info"]["has_next_page"], false);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["items"][0]["name"], "Customer 3");
}

#[tokio::test]
async fn test_list_customers_ignores_malformed_params() {
    let server = server();
    create_customer(&server, "Alice", "alice@example.com", "C-001").await;

    let response = server.get("/api/customers?page=abc&per_page=-5").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["page_info"]["current_page"], 1);
    assert_eq!(json["page_info"]["per_page"], 1);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_customers_empty() {
    let server = server();

    let response = server.get("/api/customers").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["items"], json!([]));
    assert_eq!(json["page_info"]["total_pages"], 1);
    assert_eq!(json["page_info"]["per_page"], 10);
}
