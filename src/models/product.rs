//! Product Model
//!
//! Marketplace listing owned by a single user. `user_id` is assigned at
//! creation and never reassigned; only that identity may mutate or delete
//! the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product representation, shared between database rows and API responses
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier for the product
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Non-negative price
    pub price: f64,

    /// Listing description
    pub description: String,

    /// Relative path of the uploaded image, served under `/images`
    pub image_url: String,

    /// Owning user's identity; immutable after creation
    pub user_id: Uuid,

    /// Timestamp when the product was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the product was last modified
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let product = Product {
            id: Uuid::new_v4(),
            title: "Desk lamp".to_string(),
            price: 19.99,
            description: "A lamp".to_string(),
            image_url: "images/abc.png".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("image_url").is_none());
    }
}
