use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// User-facing response strings, kept in one place so handlers and tests
/// agree on exact wording.
pub mod msg {
    pub const AMOUNT_TOO_SMALL: &str = "Amount must be at least 1";
    pub const INVALID_PAYLOAD: &str = "Invalid payload";
    pub const INVALID_SIGNATURE: &str = "Invalid signature";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    pub const UNABLE_TO_CREATE_ORDER: &str = "Unable to create order";
    pub const INTERNAL_ERROR: &str = "Internal server error";
    pub const INVALID_JSON: &str = "Invalid JSON body";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Invalid request body: {0}")]
    JsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Failure causes are logged here; response bodies only ever carry a
        // generic message.
        let (status, error) = match &self {
            AppError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            AppError::Gateway(e) => {
                tracing::error!("Razorpay gateway error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg::UNABLE_TO_CREATE_ORDER.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg::INTERNAL_ERROR.to_string(),
                )
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg::INTERNAL_ERROR.to_string(),
                )
            }
            AppError::JsonRejection(e) => {
                tracing::debug!("Request body rejected: {}", e);
                (StatusCode::BAD_REQUEST, msg::INVALID_JSON.to_string())
            }
            AppError::Internal(cause) => {
                tracing::error!("Internal error: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg::INTERNAL_ERROR.to_string(),
                )
            }
        };

        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
