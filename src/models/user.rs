//! User Model
//!
//! Account data structures. The public `User` never carries the password
//! hash or the reset-token pair; those live only on the internal row type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User representation for external API responses
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// User's display name
    pub name: String,

    /// User's email address (unique, normalized)
    pub email: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last modified
    pub updated_at: DateTime<Utc>,
}

/// Internal user row including credentials and the reset-token window.
///
/// Never exposed in API responses. The reset token and its expiration are
/// both present only while a password reset is in flight; the schema
/// enforces that they are set and cleared together.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserWithSecrets {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// bcrypt hash of the password; the plaintext is never persisted
    pub password_hash: String,

    /// Single-use password-reset token (64-char hex), if a reset is active
    #[allow(dead_code)]
    pub reset_token: Option<String>,

    /// Expiry of the reset token; the token is valid only before this time
    #[allow(dead_code)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserWithSecrets> for User {
    /// Strip credentials and reset state before anything leaves the service
    fn from(row: UserWithSecrets) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
