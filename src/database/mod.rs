//! Database Module
//!
//! Database connection management and pagination utilities.

pub mod connection;

// Re-export commonly used types
pub use connection::{DatabaseConfig, DatabasePool, Pagination};
