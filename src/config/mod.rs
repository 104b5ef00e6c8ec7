//! Configuration Module
//!
//! Process-lifetime configuration loaded from the environment once at
//! startup. The resulting `AppConfig` is immutable and injected into the
//! services that need it; nothing reads ambient globals after boot.

use anyhow::{anyhow, Result};

use crate::database::DatabaseConfig;
use crate::service::email::EmailConfig;

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Check if environment variable is set
    pub fn is_set(key: &str) -> bool {
        env::var(key).is_ok()
    }
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind configuration
    pub server: ServerConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Bearer-token signing configuration
    pub jwt: JwtConfig,

    /// SMTP configuration; absent when mail delivery is not set up
    pub email: Option<EmailConfig>,

    /// Image upload storage configuration
    pub images: ImageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
}

/// Image storage configuration
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Directory uploaded images are written to and served from
    pub dir: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::get_string("SERVER_HOST", "0.0.0.0"),
            port: env::get_u16("SERVER_PORT", 8080),
        };

        let database = DatabaseConfig::from_env()
            .map_err(|_| anyhow!("DATABASE_URL environment variable is required"))?;

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow!("JWT_SECRET environment variable is required"))?,
        };

        // Mail is optional: the service boots without SMTP and fails the
        // forgot-password operation at call time instead.
        let email = if env::is_set("SMTP_USERNAME") {
            Some(EmailConfig::from_env()?)
        } else {
            None
        };

        let images = ImageConfig {
            dir: env::get_string("IMAGE_DIR", "images"),
        };

        Ok(Self {
            server,
            database,
            jwt,
            email,
            images,
        })
    }

    /// Sanity-check values that would otherwise fail at first use
    pub fn validate(&self) -> Result<()> {
        if self.jwt.secret.len() < 16 {
            return Err(anyhow!("JWT_SECRET must be at least 16 characters"));
        }
        if self.images.dir.trim().is_empty() {
            return Err(anyhow!("IMAGE_DIR must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = AppConfig {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig::default(),
            jwt: JwtConfig {
                secret: "short".to_string(),
            },
            email: None,
            images: ImageConfig {
                dir: "images".to_string(),
            },
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_reasonable_config() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig::default(),
            jwt: JwtConfig {
                secret: "a-sufficiently-long-signing-secret".to_string(),
            },
            email: None,
            images: ImageConfig {
                dir: "images".to_string(),
            },
        };

        assert!(config.validate().is_ok());
    }
}
