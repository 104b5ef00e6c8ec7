//! Authentication Middleware
//!
//! The access guard for protected routes: extracts the bearer token from
//! the `Authorization` header, verifies it, and attaches the caller's
//! identity to the request for downstream handlers. Performs no store
//! access.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::models::AuthenticatedUser;
use crate::service::JwtService;
use crate::utils::error::{AppError, AppResult};

/// Extension type carrying the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

/// Pull the token out of a `Bearer <token>` authorization header
fn parse_bearer(header: Option<&str>) -> AppResult<&str> {
    let header = header.ok_or_else(|| AppError::Authentication("Not authenticated.".into()))?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Authentication("Invalid Authorization header format.".into()))
}

/// Access guard applied to all product routes.
///
/// Missing header, malformed header, and failed verification (expired,
/// tampered, garbage) all answer 401; 500 is reserved for genuine
/// infrastructure faults.
pub async fn auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = parse_bearer(header)?;

    let claims = jwt_service.verify_token(token)?;
    request
        .extensions_mut()
        .insert(AuthUser(AuthenticatedUser::from(&claims)));

    Ok(next.run(request).await)
}
