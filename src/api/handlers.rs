//! HTTP Request Handlers
//!
//! Axum handlers translating HTTP requests into service calls and service
//! results into the JSON response shapes of the API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::{DatabasePool, Pagination};
use crate::models::requests::*;
use crate::service::{AuthService, ProductForm, ProductService, UploadedImage};
use crate::utils::error::{AppError, AppResult};
use crate::VERSION;

use super::middleware::AuthUser;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub product_service: Arc<ProductService>,
    pub jwt_service: Arc<crate::service::JwtService>,
    pub db_pool: DatabasePool,
}

// --- Auth handlers ---

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user_id = state.auth_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created!".to_string(),
            user_id,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user_id) = state.auth_service.login(request).await?;
    Ok(Json(LoginResponse { token, user_id }))
}

/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth_service.forgot_password(request).await?;
    Ok(Json(MessageResponse::new("Password reset email sent.")))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth_service.reset_password(request).await?;
    Ok(Json(MessageResponse::new("Password reset successful.")))
}

// --- Product handlers ---

/// Raw pagination parameters; non-numeric values fall back to defaults
#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> AppResult<Json<ProductListResponse>> {
    let pagination = Pagination::from_query(params.page.as_deref(), params.per_page.as_deref());
    let listing = state.product_service.list(&pagination).await?;
    Ok(Json(listing))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.get(id).await?;
    Ok(Json(ProductResponse { product }))
}

/// POST /product (multipart: title, price, description, image)
pub async fn create_product(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductMessageResponse>)> {
    let form = read_product_form(multipart).await?;
    let product = state.product_service.create(user.user_id, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMessageResponse {
            message: "Created Product".to_string(),
            product,
        }),
    ))
}

/// PUT /product/{id} (multipart, image optional)
pub async fn update_product(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ProductMessageResponse>> {
    let form = read_product_form(multipart).await?;
    let product = state
        .product_service
        .update(id, user.user_id, form)
        .await?;

    Ok(Json(ProductMessageResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// DELETE /product/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.product_service.delete(id, user.user_id).await?;
    Ok(Json(MessageResponse::new("Product successfully deleted!")))
}

// --- Health ---

/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
) -> AppResult<Json<HealthCheckResponse>> {
    sqlx::query("SELECT 1").execute(&state.db_pool).await?;

    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    }))
}

/// Walk the multipart body and collect the product form fields
async fn read_product_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "price" => form.price = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                form.description = Some(field.text().await.map_err(multipart_error)?)
            }
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?.to_vec();
                form.image = Some(UploadedImage {
                    filename,
                    content_type,
                    data,
                });
            }
            // Unknown parts are drained and ignored.
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {}", err))
}
