//! Authentication Models
//!
//! JWT claim structures and the per-request identity attached by the
//! authentication middleware.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every bearer token issued at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Email of the authenticated user
    pub email: String,

    /// Identity of the authenticated user
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for a token valid from `issued_at` until `expires_at`
    pub fn new(
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.to_string(),
            user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

/// Identity extracted from a verified bearer token.
///
/// Threaded into handlers through request extensions; downstream services
/// receive it as an explicit parameter for ownership checks.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<&TokenClaims> for AuthenticatedUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
        }
    }
}
