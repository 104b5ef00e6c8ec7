//! Data Models Module
//!
//! Entities, JWT claims, and request/response payloads used throughout
//! the marketplace service.

pub mod auth;
pub mod product;
pub mod requests;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthenticatedUser, TokenClaims};
pub use product::Product;
pub use requests::*;
pub use user::User;
