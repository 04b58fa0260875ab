use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

/// Minimum order amount in major units (rupees).
pub const MIN_ORDER_AMOUNT: f64 = 1.0;

const DEFAULT_CURRENCY: &str = "INR";

/// Inbound body for POST /api/razorpay/create-order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CreateOrderRequest {
    /// Validate the requested amount and return it in major units.
    pub fn validate(&self) -> Result<f64> {
        match self.amount {
            Some(amount) if amount >= MIN_ORDER_AMOUNT => Ok(amount),
            _ => Err(AppError::BadRequest(msg::AMOUNT_TOO_SMALL.into())),
        }
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

/// Order payload sent to the gateway. Amount is in minor units (paise).
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub payment_capture: u8,
}

impl OrderRequest {
    /// Build a gateway order from a validated major-unit amount.
    /// Payments are always captured immediately.
    pub fn new(amount_major: f64, currency: &str) -> Self {
        Self {
            amount: to_minor_units(amount_major),
            currency: currency.to_string(),
            receipt: new_receipt(),
            payment_capture: 1,
        }
    }
}

/// Convert a major-unit amount (rupees) to minor units (paise).
pub fn to_minor_units(amount_major: f64) -> i64 {
    (amount_major * 100.0).round() as i64
}

/// Receipts only need to be unique per creation call; the millisecond clock
/// covers that.
fn new_receipt() -> String {
    format!("receipt_{}", chrono::Utc::now().timestamp_millis())
}
