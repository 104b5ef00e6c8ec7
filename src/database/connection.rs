//! Database Connection Management
//!
//! Utilities for managing PostgreSQL connections with SQLx.

use sqlx::PgPool;
use std::time::Duration;

/// Database connection pool type alias for convenience
pub type DatabasePool = PgPool;

/// Database configuration for connection setup
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/marketplace".to_string(),
            max_connections: 20,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(3600),
        }
    }
}

impl DatabaseConfig {
    /// Create database configuration from environment variables
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let url = std::env::var("DATABASE_URL")?;

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let connect_timeout_secs = std::env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let idle_timeout_secs = std::env::var("DB_IDLE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(600);

        let max_lifetime_secs = std::env::var("DB_MAX_LIFETIME")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
            max_lifetime: Duration::from_secs(max_lifetime_secs),
        })
    }

    /// Create a database connection pool from this configuration
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        sqlx::postgres::PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

/// Offset pagination resolved from raw query-string values.
///
/// `page` and `per_page` fall back to 1 and 3 when the parameter is absent
/// or not a number; `per_page` is capped at 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_PER_PAGE: i64 = 3;
    pub const MAX_PER_PAGE: i64 = 100;

    /// Resolve pagination from raw query-string parameters
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = page
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(Self::DEFAULT_PAGE);
        let per_page = per_page
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(Self::MAX_PER_PAGE))
            .unwrap_or(Self::DEFAULT_PER_PAGE);

        Self { page, per_page }
    }

    /// Row offset for the current page.
    ///
    /// Saturating: an absurdly large client-supplied page must not wrap
    /// into a negative OFFSET.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Whether a page after the current one exists for `total` rows
    pub fn has_next_page(&self, total: i64) -> bool {
        self.per_page.saturating_mul(self.page) < total
    }

    /// Whether a page before the current one exists
    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::from_query(None, None);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 3);

        // Non-numeric values fall back to the defaults too.
        let pagination = Pagination::from_query(Some("abc"), Some("-"));
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 3);
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination::from_query(Some("3"), Some("3"));
        assert_eq!(pagination.offset(), 6);

        let pagination = Pagination::from_query(Some("1"), Some("10"));
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_page_flags_with_seven_products() {
        // 7 products, 3 per page: pages are 3 / 3 / 1 items.
        let first = Pagination::from_query(Some("1"), Some("3"));
        assert!(first.has_next_page(7));
        assert!(!first.has_prev_page());

        let last = Pagination::from_query(Some("3"), Some("3"));
        assert!(!last.has_next_page(7));
        assert!(last.has_prev_page());
    }

    #[test]
    fn test_pagination_survives_huge_page_values() {
        let pagination = Pagination::from_query(Some("9223372036854775807"), Some("3"));
        assert!(pagination.offset() >= 0);
        assert!(!pagination.has_next_page(7));
        assert!(pagination.has_prev_page());

        // i64::MAX in both fields through the public struct literal.
        let pagination = Pagination {
            page: i64::MAX,
            per_page: i64::MAX,
        };
        assert_eq!(pagination.offset(), i64::MAX);
    }

    #[test]
    fn test_pagination_caps_per_page() {
        let pagination = Pagination::from_query(Some("1"), Some("100000"));
        assert_eq!(pagination.per_page, Pagination::MAX_PER_PAGE);
    }

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }
}
