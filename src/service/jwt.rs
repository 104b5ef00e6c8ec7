//! JWT Service
//!
//! Issues and verifies the signed bearer tokens presented on protected
//! routes. Tokens carry the holder's email and user id and expire after
//! one hour, or thirty days when the login asked to be remembered.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::models::TokenClaims;
use crate::utils::error::{AppError, AppResult};

/// Token issuer/verifier holding the process-lifetime signing secret
#[derive(Clone)]
pub struct JwtService {
    /// HS256 signing secret
    secret: String,
    /// Expiration for a regular session token
    session_ttl: Duration,
    /// Expiration for an extended ("remember me") session token
    extended_session_ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the default 1-hour / 30-day expiries
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            session_ttl: Duration::hours(1),
            extended_session_ttl: Duration::days(30),
        }
    }

    /// Issue a signed bearer token for the given identity.
    ///
    /// `extended_session` selects the 30-day expiry instead of 1 hour.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        email: &str,
        extended_session: bool,
    ) -> AppResult<String> {
        let ttl = if extended_session {
            self.extended_session_ttl
        } else {
            self.session_ttl
        };

        let now = Utc::now();
        let claims = TokenClaims::new(user_id, email, now, now + ttl);
        self.encode_token(&claims)
    }

    /// Verify a bearer token's signature and expiry and return its claims.
    ///
    /// Every verification failure (expired, tampered, malformed) is an
    /// authentication error; 500 is reserved for infrastructure faults.
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let validation = Validation::new(Algorithm::HS256);
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Authentication("Invalid or expired token.".into()))
    }

    fn encode_token(&self, claims: &TokenClaims) -> AppResult<String> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&header, claims, &encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-signing-secret-for-unit-tests".to_string())
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.issue_token(user_id, "a@x.com", false).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_extended_session_lasts_thirty_days() {
        let service = service();
        let token = service
            .issue_token(Uuid::new_v4(), "a@x.com", true)
            .unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let now = Utc::now();

        // Expired well past the decoder's leeway window.
        let claims = TokenClaims::new(
            Uuid::new_v4(),
            "a@x.com",
            now - Duration::hours(2),
            now - Duration::hours(1),
        );
        let token = service.encode_token(&claims).unwrap();

        let err = service.verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = service()
            .issue_token(Uuid::new_v4(), "a@x.com", false)
            .unwrap();

        let other = JwtService::new("a-completely-different-secret".to_string());
        let err = other.verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = service().verify_token("not.a.jwt").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }
}
