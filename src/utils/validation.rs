//! Validation Utilities
//!
//! Input validation for auth and product payloads. Failures are collected
//! as a batch of field violations so a response always lists every broken
//! rule, not just the first one.

use regex::Regex;
use std::sync::OnceLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::error::FieldViolation;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Validates email address format
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Normalizes an email address to lowercase and strips surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Custom validator for email fields
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_email");
        err.message = Some("Please enter a valid email.".into());
        Err(err)
    }
}

/// Custom validator for display names: non-empty after trimming
pub fn name_validator(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("empty_name");
        err.message = Some("Name must not be an empty string.".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Custom validator for passwords: minimum length after trimming
pub fn password_validator(password: &str) -> Result<(), ValidationError> {
    if password.trim().len() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("short_password");
        err.message = Some("Password must be at least 5 characters long.".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Flatten a `ValidationErrors` tree into the violation batch reported in
/// the error envelope's `data` field.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();

    // HashMap iteration order is unstable; keep responses deterministic.
    violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    violations
}

/// Validate a request payload, returning every violated rule as one batch
pub fn validate_payload<T: Validate>(payload: &T) -> Vec<FieldViolation> {
    match payload.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_violations(&errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@domain.co.uk"));
        assert!(!validate_email("invalid.email"));
        assert!(!validate_email("@domain.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  USER@EXAMPLE.COM  "), "user@example.com");
        assert_eq!(normalize_email("Test@Domain.org"), "test@domain.org");
    }

    #[test]
    fn test_name_validator() {
        assert!(name_validator("Ada Lovelace").is_ok());
        assert!(name_validator("").is_err());
        assert!(name_validator("   ").is_err());
    }

    #[test]
    fn test_password_validator() {
        assert!(password_validator("pass1").is_ok());
        assert!(password_validator("pass").is_err());
        // Surrounding whitespace does not count towards the minimum.
        assert!(password_validator("  ab  ").is_err());
    }

    #[test]
    fn test_collect_violations_reports_every_rule() {
        #[derive(Validate)]
        struct Payload {
            #[validate(custom(function = email_validator))]
            email: String,
            #[validate(custom(function = password_validator))]
            password: String,
        }

        let payload = Payload {
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
        };

        let violations = validate_payload(&payload);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.field == "email"));
        assert!(violations.iter().any(|v| v.field == "password"));
    }
}
