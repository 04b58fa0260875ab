use axum::{Router, extract::State, routing::post};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::Result;
use crate::extractors::Json;
use crate::models::{SUBSCRIPTION_SOURCE, SubscribeRequest, SubscribeStatus};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/newsletter/subscribe", post(subscribe))
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: SubscribeStatus,
}

/// Record a newsletter subscription.
///
/// Validation happens before the store is touched; a duplicate email is
/// reported as `already_subscribed` rather than an error.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = request.validate()?;

    let pool = state.store.get()?;
    let conn = pool.get()?;
    let status = queries::create_subscriber(&conn, &email, SUBSCRIPTION_SOURCE)?;

    if status == SubscribeStatus::Subscribed {
        tracing::info!("New newsletter subscriber recorded");
    }

    Ok(Json(SubscribeResponse {
        success: true,
        message: status,
    }))
}
