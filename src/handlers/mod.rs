pub mod newsletter;
pub mod razorpay;

use axum::{Router, routing::get};

use crate::db::AppState;

async fn index() -> &'static str {
    "Propmatics payment server is running"
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(razorpay::router())
        .merge(newsletter::router())
}
