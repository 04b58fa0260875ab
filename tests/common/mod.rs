//! Test utilities and fixtures for Propmatics integration tests

#![allow(dead_code)]

use axum::Router;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub use propmatics::config::RazorpayConfig;
pub use propmatics::db::{AppState, DbPool, Store, init_db, queries};
pub use propmatics::handlers;
pub use propmatics::models::*;
pub use propmatics::payments::RazorpayClient;

pub const TEST_KEY_ID: &str = "rzp_test_key";
pub const TEST_KEY_SECRET: &str = "rzp_test_secret";

/// Razorpay client with fixed test credentials. Signature verification is
/// pure, so these tests never touch the network.
pub fn test_razorpay_client() -> RazorpayClient {
    RazorpayClient::new(&RazorpayConfig {
        key_id: TEST_KEY_ID.to_string(),
        key_secret: TEST_KEY_SECRET.to_string(),
    })
}

/// In-memory store pool with the schema initialized.
///
/// max_size is 1 so every checkout sees the same in-memory database.
pub fn setup_test_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }
    pool
}

/// AppState over an in-memory store and test gateway credentials.
pub fn create_test_app_state() -> AppState {
    AppState {
        store: Store::from_pool(setup_test_pool()),
        razorpay: test_razorpay_client(),
    }
}

/// The full application router over a test state.
pub fn app(state: AppState) -> Router {
    handlers::router().with_state(state)
}

/// Compute a valid callback signature the way the gateway does.
pub fn compute_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let payload = format!("{}|{}", order_id, payment_id);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
