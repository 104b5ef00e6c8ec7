//! Marketplace Service Library
//!
//! A small product/user marketplace backend: account registration and
//! login, a password-reset email flow, and CRUD over products with image
//! upload, gated by bearer-token authentication.
//!
//! # Features
//!
//! - **Token-based auth**: HS256 bearer tokens with 1-hour or 30-day
//!   expiry chosen at login
//! - **Password security**: bcrypt hashing at cost 12; single-use,
//!   time-boxed reset tokens delivered by email
//! - **Ownership enforcement**: only the creating identity may update or
//!   delete a product
//! - **Image uploads**: multipart uploads stored on disk with
//!   collision-resistant names and served back under `/images`
//! - **Batch validation**: every violated input rule is reported in one
//!   422 response
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use marketplace_service::{
//!     api::{create_routes, AppState},
//!     config::AppConfig,
//!     service::{AuthService, ImageStore, JwtService, ProductService},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = config.database.create_pool().await?;
//!
//!     let jwt_service = Arc::new(JwtService::new(config.jwt.secret.clone()));
//!     let image_store = Arc::new(ImageStore::new(&config.images.dir));
//!     let auth_service = Arc::new(AuthService::new(pool.clone(), jwt_service.clone(), None));
//!     let product_service = Arc::new(ProductService::new(pool.clone(), image_store));
//!
//!     let state = AppState {
//!         auth_service,
//!         product_service,
//!         jwt_service,
//!         db_pool: pool,
//!     };
//!     let app = create_routes(state, &config.images.dir);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod service;
pub mod utils;

/// Crate version, reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
