//! API Route Definitions
//!
//! Assembles the public auth routes, the token-guarded product routes,
//! and the static image mount into one router.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers::{self, AppState};
use super::middleware::auth_middleware;

/// Build the application router.
///
/// `image_dir` is the directory uploads are written to; it is served back
/// under `/images`.
pub fn create_routes(state: AppState, image_dir: &str) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/forgot-password", post(handlers::forgot_password))
        .route("/reset-password", post(handlers::reset_password));

    // Every product route sits behind the access guard.
    let product_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{id}", get(handlers::get_product))
        .route("/product", post(handlers::create_product))
        .route(
            "/product/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes)
        .merge(product_routes)
        .nest_service("/images", ServeDir::new(image_dir))
        .with_state(state)
}
