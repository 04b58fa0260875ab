use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::RazorpayConfig;
use crate::error::{AppError, Result};
use crate::models::OrderRequest;

type HmacSha256 = Hmac<Sha256>;

const ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// Gateway calls time out rather than parking a handler task forever.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RazorpayClient {
    client: Client,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(config: &RazorpayConfig) -> Self {
        let client = Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .expect("Failed to build gateway HTTP client");

        Self {
            client,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        }
    }

    /// Create an order with the gateway.
    ///
    /// The gateway's order object is returned as-is; nothing in it is
    /// inspected or rewritten locally.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(order)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("order create request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "order create returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("failed to parse order response: {}", e)))
    }

    /// Verify a payment-callback signature.
    ///
    /// The expected signature is HMAC-SHA256 over `"{order_id}|{payment_id}"`
    /// keyed with the gateway secret, hex-encoded.
    pub fn verify_payment_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool> {
        let signed_payload = format!("{}|{}", order_id, payment_id);

        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .map_err(|_| AppError::Internal("invalid gateway secret".into()))?;
        mac.update(signed_payload.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        // Use constant-time comparison to prevent timing attacks.
        // An attacker could otherwise measure response times to progressively
        // discover the correct signature byte-by-byte.
        let expected_bytes = expected.as_bytes();
        let provided_bytes = signature.as_bytes();

        // Length check is not constant-time, but that's fine - signature length
        // is not secret (it's always 64 hex chars for SHA-256)
        if expected_bytes.len() != provided_bytes.len() {
            return Ok(false);
        }

        Ok(expected_bytes.ct_eq(provided_bytes).into())
    }
}
