//! Auth Service
//!
//! Orchestrates the credential lifecycle: registration, login,
//! forgot-password, and reset-password. Persistence, hashing, token
//! signing, and mail delivery are reached through the injected
//! collaborators; no plaintext password is ever stored or logged.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::requests::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::models::user::UserWithSecrets;
use crate::service::{EmailService, JwtService};
use crate::utils::{
    error::{AppError, AppResult, FieldViolation},
    security::{generate_reset_token, hash_password_with_cost, verify_password, BCRYPT_COST},
    validation::{normalize_email, validate_payload},
};

/// Validity window of a password-reset token
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Core authentication service
pub struct AuthService {
    db_pool: DatabasePool,
    jwt_service: Arc<JwtService>,
    /// Absent when SMTP is not configured; forgot-password then fails
    email_service: Option<Arc<EmailService>>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        db_pool: DatabasePool,
        jwt_service: Arc<JwtService>,
        email_service: Option<Arc<EmailService>>,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            email_service,
            bcrypt_cost: BCRYPT_COST,
        }
    }

    /// Register a new account and return its identity.
    ///
    /// Every violated rule (email format, email uniqueness, password
    /// length, empty name) is reported in one batch; nothing is persisted
    /// unless the whole batch is clean.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<Uuid> {
        let mut violations = validate_payload(&request);
        let email = normalize_email(&request.email);

        // Uniqueness is only worth checking for a well-formed address.
        if !violations.iter().any(|v| v.field == "email")
            && self.find_user_by_email(&email).await?.is_some()
        {
            violations.push(FieldViolation::new("email", "E-Mail address already exists!"));
        }

        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let password_hash = hash_password_with_cost(&request.password, self.bcrypt_cost)?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(request.name.trim())
        .fetch_one(&self.db_pool)
        .await
        .map_err(Self::map_duplicate_email)?;

        log::info!("registered user {}", user_id);
        Ok(user_id)
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password both yield 401; only the message
    /// text differs.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(String, Uuid)> {
        let violations = validate_payload(&request);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let email = normalize_email(&request.email);
        let user = self.find_user_by_email(&email).await?.ok_or_else(|| {
            AppError::Authentication("A user with this email could not be found.".into())
        })?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Authentication("Wrong password.".into()));
        }

        let token =
            self.jwt_service
                .issue_token(user.id, &user.email, request.remember_for_30_days)?;

        Ok((token, user.id))
    }

    /// Start the password-reset flow: store a fresh single-use token with
    /// a 1-hour window and mail a link embedding it.
    ///
    /// Responds 404 for unknown addresses. This leaks account existence;
    /// kept deliberately to match the documented contract (see DESIGN.md).
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> AppResult<()> {
        let violations = validate_payload(&request);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        // Resolve the transport before touching the row; a live reset
        // token must not outlast a mail that was never sent.
        let mailer = self
            .email_service
            .as_ref()
            .ok_or_else(|| AppError::Internal("mail transport is not configured".into()))?;

        let email = normalize_email(&request.email);
        let user = self
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

        let reset_token = generate_reset_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        sqlx::query(
            "UPDATE users
             SET reset_token = $1, reset_token_expires_at = $2, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&reset_token)
        .bind(expires_at)
        .bind(user.id)
        .execute(&self.db_pool)
        .await?;

        mailer
            .send_password_reset_email(&user.email, &reset_token)
            .await?;

        log::info!("password reset initiated for user {}", user.id);
        Ok(())
    }

    /// Complete the password-reset flow.
    ///
    /// A single UPDATE matches only a user holding this exact token with
    /// an unexpired window and clears both reset columns in the same
    /// statement, so the token cannot be replayed.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<()> {
        let violations = validate_payload(&request);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let password_hash = hash_password_with_cost(&request.password, self.bcrypt_cost)?;

        let result = sqlx::query(
            "UPDATE users
             SET password_hash = $1, reset_token = NULL, reset_token_expires_at = NULL,
                 updated_at = NOW()
             WHERE reset_token = $2 AND reset_token_expires_at > NOW()",
        )
        .bind(&password_hash)
        .bind(&request.token)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            // Unknown, expired, and already-used tokens are indistinguishable.
            return Err(AppError::BadRequest("Token is invalid or has expired.".into()));
        }

        Ok(())
    }

    /// A concurrent insert can slip past the uniqueness pre-check in
    /// `register`; the constraint violation then surfaces here and is
    /// reported as the same field violation the pre-check would have
    /// produced.
    fn map_duplicate_email(err: sqlx::Error) -> AppError {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Validation(vec![FieldViolation::new(
                    "email",
                    "E-Mail address already exists!",
                )])
            }
            _ => AppError::Database(err),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserWithSecrets>> {
        let user = sqlx::query_as::<_, UserWithSecrets>(
            "SELECT id, name, email, password_hash, reset_token, reset_token_expires_at,
                    created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }
}
