//! Error Handling Utilities
//!
//! The application-wide error taxonomy and its mapping onto the generic
//! `{message, data?}` HTTP error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single violated validation rule, reported back to the client
/// alongside every other violation from the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending request field
    pub field: String,
    /// Human-readable description of the violated rule
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main application error type covering every failure a request can surface
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input failed validation; carries the full batch of violations
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Malformed or expired single-use credential (e.g. a reset token)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid authentication credential or bearer token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authenticated caller is not authorized for this resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing errors
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Unexpected internal failures (mail transport, file system, ...)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status carried out-of-band next to the error envelope
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Hashing(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Generic error envelope: `{message: string, data?: any}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
        }
    }

    pub fn with_data(message: &str, data: serde_json::Value) -> Self {
        Self {
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details (driver messages, hashing errors) are logged
        // and never cross the HTTP boundary.
        let body = match self {
            AppError::Validation(violations) => {
                ErrorResponse::with_data("Validation failed.", serde_json::json!(violations))
            }
            AppError::BadRequest(message)
            | AppError::Authentication(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message) => ErrorResponse::new(&message),
            AppError::Database(err) => {
                log::error!("database error: {}", err);
                ErrorResponse::new("Something failed.")
            }
            AppError::Hashing(err) => {
                log::error!("password hashing error: {}", err);
                ErrorResponse::new("Something failed.")
            }
            AppError::Internal(message) => {
                log::error!("internal error: {}", message);
                ErrorResponse::new("Something failed.")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::BadRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Authentication("nope".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("not yours".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let response =
            AppError::Internal("smtp relay refused connection".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The serialized envelope carries only the generic message.
        let envelope = ErrorResponse::new("Something failed.");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["message"], "Something failed.");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_validation_envelope_carries_all_violations() {
        let violations = vec![
            FieldViolation::new("email", "Please enter a valid email."),
            FieldViolation::new("password", "Password must be at least 5 characters long."),
        ];
        let envelope =
            ErrorResponse::with_data("Validation failed.", serde_json::json!(violations));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["field"], "email");
        assert_eq!(json["data"][1]["field"], "password");
    }
}
