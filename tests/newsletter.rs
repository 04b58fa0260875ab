//! Newsletter subscription flow tests

mod common;

use axum::{Router, body::Body, http::Request};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::*;

async fn post_subscribe(app: Router, body: Value) -> (axum::http::StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/newsletter/subscribe")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).expect("Response should be valid JSON");
    (status, json)
}

#[tokio::test]
async fn test_subscribe_records_new_email() {
    let pool = setup_test_pool();
    let state = AppState {
        store: Store::from_pool(pool.clone()),
        razorpay: test_razorpay_client(),
    };
    let app = app(state);

    let (status, body) = post_subscribe(app, json!({ "email": "user@example.com" })).await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("subscribed"));

    let conn = pool.get().unwrap();
    let subscriber = queries::get_subscriber_by_email(&conn, "user@example.com")
        .unwrap()
        .expect("Subscriber should be stored");
    assert_eq!(subscriber.source, SUBSCRIPTION_SOURCE);
    assert!(subscriber.subscribed_at > 0);
}

#[tokio::test]
async fn test_subscribe_twice_is_idempotent() {
    let pool = setup_test_pool();
    let state = AppState {
        store: Store::from_pool(pool.clone()),
        razorpay: test_razorpay_client(),
    };
    let app = app(state);

    let (status, body) =
        post_subscribe(app.clone(), json!({ "email": "repeat@example.com" })).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["message"], json!("subscribed"));

    let (status, body) = post_subscribe(app, json!({ "email": "repeat@example.com" })).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("already_subscribed"));

    let conn = pool.get().unwrap();
    assert_eq!(
        queries::count_subscribers(&conn).unwrap(),
        1,
        "Exactly one record should exist after a duplicate subscribe"
    );
}

#[tokio::test]
async fn test_subscribe_trims_email_before_storing() {
    let pool = setup_test_pool();
    let state = AppState {
        store: Store::from_pool(pool.clone()),
        razorpay: test_razorpay_client(),
    };
    let app = app(state);

    let (status, _) = post_subscribe(app, json!({ "email": "  padded@example.com  " })).await;
    assert_eq!(status, axum::http::StatusCode::OK);

    let conn = pool.get().unwrap();
    assert!(
        queries::get_subscriber_by_email(&conn, "padded@example.com")
            .unwrap()
            .is_some(),
        "Email should be stored trimmed"
    );
}

#[tokio::test]
async fn test_subscribe_missing_email_rejected() {
    let pool = setup_test_pool();
    let state = AppState {
        store: Store::from_pool(pool.clone()),
        razorpay: test_razorpay_client(),
    };
    let app = app(state);

    let (status, body) = post_subscribe(app, json!({})).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Email is required"));

    let conn = pool.get().unwrap();
    assert_eq!(queries::count_subscribers(&conn).unwrap(), 0);
}

#[tokio::test]
async fn test_subscribe_invalid_email_rejected_without_store_write() {
    let pool = setup_test_pool();
    let state = AppState {
        store: Store::from_pool(pool.clone()),
        razorpay: test_razorpay_client(),
    };
    let app = app(state);

    let (status, body) = post_subscribe(app, json!({ "email": "not-an-email" })).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid email format"));

    let conn = pool.get().unwrap();
    assert_eq!(queries::count_subscribers(&conn).unwrap(), 0);
}

#[test]
fn test_duplicate_insert_hits_store_constraint() {
    // Direct query-level check that uniqueness is store-enforced, not just
    // application-checked.
    let pool = setup_test_pool();
    let conn = pool.get().unwrap();

    let first = queries::create_subscriber(&conn, "dup@example.com", SUBSCRIPTION_SOURCE).unwrap();
    assert_eq!(first, SubscribeStatus::Subscribed);

    let second = queries::create_subscriber(&conn, "dup@example.com", SUBSCRIPTION_SOURCE).unwrap();
    assert_eq!(second, SubscribeStatus::AlreadySubscribed);

    assert_eq!(queries::count_subscribers(&conn).unwrap(), 1);
}
