use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

/// Source tag stamped on every subscriber record.
pub const SUBSCRIPTION_SOURCE: &str = "propmatics.com";

/// A newsletter subscriber record.
#[derive(Debug, Clone, Serialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub subscribed_at: i64,
    pub source: String,
}

/// Inbound body for POST /api/newsletter/subscribe.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
}

impl SubscribeRequest {
    /// Validate the email and return it trimmed.
    pub fn validate(&self) -> Result<String> {
        let email = self.email.as_deref().unwrap_or("").trim();
        if email.is_empty() {
            return Err(AppError::BadRequest(msg::EMAIL_REQUIRED.into()));
        }
        validate_email_format(email)?;
        Ok(email.to_string())
    }
}

/// Basic email format validation.
///
/// Validates that email has:
/// - Exactly one @ symbol
/// - Non-empty local part (before @)
/// - Non-empty domain part (after @)
/// - At least one dot in the domain
///
/// This is intentionally permissive to avoid rejecting valid but unusual
/// emails. It's not meant to be RFC 5322 compliant - just a basic sanity
/// check.
fn validate_email_format(email: &str) -> Result<()> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(AppError::BadRequest(msg::INVALID_EMAIL_FORMAT.into()));
    }

    let local_part = parts[0];
    let domain_part = parts[1];

    if local_part.is_empty() {
        return Err(AppError::BadRequest(msg::INVALID_EMAIL_FORMAT.into()));
    }

    if domain_part.is_empty() || !domain_part.contains('.') {
        return Err(AppError::BadRequest(msg::INVALID_EMAIL_FORMAT.into()));
    }

    if domain_part.starts_with('.') || domain_part.ends_with('.') {
        return Err(AppError::BadRequest(msg::INVALID_EMAIL_FORMAT.into()));
    }

    if local_part.contains(' ') {
        return Err(AppError::BadRequest(msg::INVALID_EMAIL_FORMAT.into()));
    }

    Ok(())
}

/// Outcome of a subscribe call. Duplicates are a success, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeStatus {
    Subscribed,
    AlreadySubscribed,
}
