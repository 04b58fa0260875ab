use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::db::AppState;
use crate::error::{Result, msg};
use crate::extractors::Json;
use crate::models::{CreateOrderRequest, OrderRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/razorpay/create-order", post(create_order))
        .route("/api/razorpay/verify-payment", post(verify_payment))
}

/// Create a gateway order for the requested amount.
///
/// The gateway's order object goes back to the caller unmodified; the
/// front-end hands it to the checkout widget as-is.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    let amount = request.validate()?;
    let order = OrderRequest::new(amount, request.currency());

    let created = state.razorpay.create_order(&order).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl VerifyPaymentRequest {
    /// All three identifiers, or None if any is missing or empty.
    fn fields(&self) -> Option<(&str, &str, &str)> {
        let order_id = self
            .razorpay_order_id
            .as_deref()
            .filter(|s| !s.is_empty())?;
        let payment_id = self
            .razorpay_payment_id
            .as_deref()
            .filter(|s| !s.is_empty())?;
        let signature = self
            .razorpay_signature
            .as_deref()
            .filter(|s| !s.is_empty())?;
        Some((order_id, payment_id, signature))
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Verify a payment-callback signature.
///
/// A mismatch is a well-formed negative outcome (400 with `success: false`),
/// not an internal error. Missing fields are rejected before any
/// cryptographic work.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Response> {
    let Some((order_id, payment_id, signature)) = request.fields() else {
        return Ok(reject(msg::INVALID_PAYLOAD));
    };

    let verified = state
        .razorpay
        .verify_payment_signature(order_id, payment_id, signature)?;

    if !verified {
        return Ok(reject(msg::INVALID_SIGNATURE));
    }

    // TODO: persist the booking + payment record once the booking model lands.
    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: None,
    })
    .into_response())
}

fn reject(message: &'static str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(VerifyPaymentResponse {
            success: false,
            message: Some(message),
        }),
    )
        .into_response()
}
