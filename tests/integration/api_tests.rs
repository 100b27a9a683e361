//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a book with a unique code, returning its id
async fn create_book(client: &Client, code: &str, stock: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "code": code,
            "title": "Harry Potter",
            "author": "J.K Rowling",
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    body["data"]["id"].as_i64().expect("No book ID")
}

/// Create a member with a unique code, returning its id
async fn create_member(client: &Client, code: &str) -> i64 {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({ "code": code, "name": "Angga" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("No member ID")
}

async fn borrow(client: &Client, member_id: i64, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrowings", BASE_URL))
        .json(&json!({ "memberId": member_id, "bookId": book_id }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn return_book(client: &Client, member_id: i64, book_id: i64) -> reqwest::Response {
    client
        .put(format!("{}/borrowings/0/return", BASE_URL))
        .json(&json!({ "memberId": member_id, "bookId": book_id }))
        .send()
        .await
        .expect("Failed to send request")
}

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

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_penalized_member_cannot_borrow() {
    let client = Client::new();
    let member_id = create_member(&client, "PEN-M1").await;
    let book_id = create_book(&client, "PEN-B1", 1).await;

    let response = client
        .put(format!("{}/members/{}", BASE_URL, member_id))
        .json(&json!({ "penalty": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = borrow(&client, member_id, book_id).await;
    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Member is currently penalized and cannot borrow books"
    );
}

#[tokio::test]
#[ignore]
async fn test_book_crud() {
    let client = Client::new();
    let book_id = create_book(&client, "CRUD-1", 3).await;

    // Detail
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "CRUD-1");
    assert_eq!(body["data"]["stock"], 3);

    // Partial update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "stock": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["stock"], 5);
    assert_eq!(body["data"]["title"], "Harry Potter");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Gone
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_book_code_rejected() {
    let client = Client::new();
    create_book(&client, "DUP-1", 1).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "code": "DUP-1",
            "title": "Harry Potter",
            "author": "J.K Rowling",
            "stock": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book with this code already exists.");
}

#[tokio::test]
#[ignore]
async fn test_member_not_found_on_borrow() {
    let client = Client::new();
    let book_id = create_book(&client, "NF-1", 1).await;

    let response = borrow(&client, 999999, book_id).await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Member not found");
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let member_id = create_member(&client, "FLOW-M1").await;
    let book_id = create_book(&client, "FLOW-B1", 1).await;

    // Borrow succeeds
    let response = borrow(&client, member_id, book_id).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["data"]["returnedAt"].is_null());

    // Stock went to zero and counters moved
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["data"]["stock"], 0);

    let member: Value = client
        .get(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(member["data"]["booksBorrowed"], 1);

    // Borrowed book no longer appears in the available list
    let books: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(books["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["id"].as_i64() != Some(book_id)));

    // A second member cannot borrow the same book
    let other_member = create_member(&client, "FLOW-M2").await;
    let response = borrow(&client, other_member, book_id).await;
    assert_eq!(response.status(), 404); // stock is 0

    // Return restores stock and counters
    let response = return_book(&client, member_id, book_id).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["data"]["returnedAt"].is_null());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["data"]["stock"], 1);

    // Returning again fails
    let response = return_book(&client, member_id, book_id).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_borrow_cap_of_two_books() {
    let client = Client::new();
    let member_id = create_member(&client, "CAP-M1").await;
    let first = create_book(&client, "CAP-B1", 1).await;
    let second = create_book(&client, "CAP-B2", 1).await;
    let third = create_book(&client, "CAP-B3", 1).await;

    assert_eq!(borrow(&client, member_id, first).await.status(), 201);
    assert_eq!(borrow(&client, member_id, second).await.status(), 201);

    let response = borrow(&client, member_id, third).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Member may not borrow more than 2 books at a time"
    );
}
