//! Request and Response Models
//!
//! Payload structures for the HTTP API with validation rules attached.
//! Validation failures are reported as one batch covering every broken
//! rule (see `utils::validation`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::product::Product;
use crate::utils::validation::{email_validator, name_validator, password_validator};

/// Request payload for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address; must be valid and not already registered
    #[validate(custom(function = email_validator))]
    pub email: String,

    /// Display name; must be non-empty after trimming
    #[validate(custom(function = name_validator))]
    pub name: String,

    /// Password; at least 5 characters
    #[validate(custom(function = password_validator))]
    pub password: String,
}

/// Request payload for login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = email_validator))]
    pub email: String,

    #[validate(custom(function = password_validator))]
    pub password: String,

    /// Extends the bearer token's lifetime from 1 hour to 30 days
    #[serde(default, rename = "rememberFor30Days")]
    pub remember_for_30_days: bool,
}

/// Request payload for starting the password-reset flow
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(custom(function = email_validator))]
    pub email: String,
}

/// Request payload for completing the password-reset flow
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Single-use reset token from the emailed link
    #[validate(length(min = 1, message = "Token is required."))]
    pub token: String,

    /// Replacement password; at least 5 characters
    #[validate(custom(function = password_validator))]
    pub password: String,
}

/// Scalar product fields shared by the create and update multipart forms
#[derive(Debug, Clone, Validate)]
pub struct ProductFields {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,

    #[validate(range(min = 0.0, message = "Price must not be negative."))]
    pub price: f64,

    #[validate(length(min = 1, message = "Description must not be empty."))]
    pub description: String,
}

/// Response for successful registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Response for successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Plain confirmation message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Response wrapping a single product
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Response wrapping a mutated product with a confirmation message
#[derive(Debug, Serialize)]
pub struct ProductMessageResponse {
    pub message: String,
    pub product: Product,
}

/// Paginated product listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub total_products: i64,
}

/// Response for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}
