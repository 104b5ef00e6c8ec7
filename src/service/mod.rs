//! Service Layer
//!
//! Business logic for authentication, products, tokens, mail, and image
//! storage.

pub mod auth;
pub mod email;
pub mod jwt;
pub mod product;
pub mod storage;

// Re-export services
pub use auth::AuthService;
pub use email::{EmailConfig, EmailService};
pub use jwt::JwtService;
pub use product::{ProductForm, ProductService};
pub use storage::{ImageStore, UploadedImage};
