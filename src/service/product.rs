//! Product Service
//!
//! CRUD over marketplace products with per-resource ownership checks:
//! only the identity that created a product may update or delete it.
//! Image files are replaced and removed best-effort through the
//! `ImageStore`; their failures never abort the database operation.

use std::sync::Arc;

use uuid::Uuid;

use crate::database::{DatabasePool, Pagination};
use crate::models::product::Product;
use crate::models::requests::{ProductFields, ProductListResponse};
use crate::service::storage::{ImageStore, UploadedImage};
use crate::utils::{
    error::{AppError, AppResult, FieldViolation},
    validation::validate_payload,
};

/// Raw multipart form for product create/update
#[derive(Debug, Default)]
pub struct ProductForm {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<UploadedImage>,
}

impl ProductForm {
    /// Resolve the scalar fields, collecting every violated rule.
    ///
    /// Missing or non-numeric prices are violations rather than parse
    /// errors so they land in the same 422 batch as everything else.
    fn resolve_fields(&self) -> (ProductFields, Vec<FieldViolation>) {
        let mut violations = Vec::new();

        let price = match self.price.as_deref().map(|p| p.trim().parse::<f64>()) {
            Some(Ok(price)) => price,
            Some(Err(_)) => {
                violations.push(FieldViolation::new("price", "Price must be a number."));
                0.0
            }
            None => {
                violations.push(FieldViolation::new("price", "Price is required."));
                0.0
            }
        };

        let fields = ProductFields {
            title: self.title.as_deref().unwrap_or_default().trim().to_string(),
            price,
            description: self
                .description
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };

        violations.extend(validate_payload(&fields));
        (fields, violations)
    }
}

/// Product CRUD service
pub struct ProductService {
    db_pool: DatabasePool,
    image_store: Arc<ImageStore>,
}

impl ProductService {
    pub fn new(db_pool: DatabasePool, image_store: Arc<ImageStore>) -> Self {
        Self {
            db_pool,
            image_store,
        }
    }

    /// Offset-paginated listing ordered by creation time
    pub async fn list(&self, pagination: &Pagination) -> AppResult<ProductListResponse> {
        let total_products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db_pool)
            .await?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, image_url, user_id, created_at, updated_at
             FROM products ORDER BY created_at LIMIT $1 OFFSET $2",
        )
        .bind(pagination.per_page)
        .bind(pagination.offset())
        .fetch_all(&self.db_pool)
        .await?;

        Ok(ProductListResponse {
            products,
            has_next_page: pagination.has_next_page(total_products),
            has_prev_page: pagination.has_prev_page(),
            total_products,
        })
    }

    /// Fetch a single product
    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found.".into()))
    }

    /// Create a product owned by `owner_id`. The image part is mandatory.
    pub async fn create(&self, owner_id: Uuid, form: ProductForm) -> AppResult<Product> {
        let (fields, mut violations) = form.resolve_fields();

        // Missing part and rejected content type read the same to the
        // client: no usable image arrived.
        let image = form
            .image
            .filter(|image| ImageStore::is_allowed_type(&image.content_type));
        let Some(image) = image else {
            violations.push(FieldViolation::new("image", "Attached file is not an image."));
            return Err(AppError::Validation(violations));
        };

        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let image_url = self.image_store.save(&image).await?;

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (title, price, description, image_url, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, price, description, image_url, user_id, created_at, updated_at",
        )
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.description)
        .bind(&image_url)
        .bind(owner_id)
        .fetch_one(&self.db_pool)
        .await?;

        log::info!("user {} created product {}", owner_id, product.id);
        Ok(product)
    }

    /// Overwrite a product's scalar fields, optionally replacing its image.
    ///
    /// Only the owning identity may update; ownership is compared against
    /// the identity the access guard attached, and `user_id` itself is
    /// never reassigned.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        form: ProductForm,
    ) -> AppResult<Product> {
        let existing = self
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found.".into()))?;

        if existing.user_id != caller_id {
            return Err(AppError::Forbidden("Not authorized.".into()));
        }

        let (fields, mut violations) = form.resolve_fields();
        if let Some(image) = &form.image {
            if !ImageStore::is_allowed_type(&image.content_type) {
                violations.push(FieldViolation::new("image", "Invalid file format!"));
            }
        }
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let image_url = match &form.image {
            Some(image) => self.image_store.save(image).await?,
            None => existing.image_url.clone(),
        };

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products
             SET title = $1, price = $2, description = $3, image_url = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING id, title, price, description, image_url, user_id, created_at, updated_at",
        )
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.description)
        .bind(&image_url)
        .bind(id)
        .fetch_one(&self.db_pool)
        .await?;

        // The old file is only released once the row points at the new one.
        if form.image.is_some() {
            self.image_store.delete_best_effort(&existing.image_url).await;
        }

        Ok(product)
    }

    /// Delete a product and release its stored image.
    ///
    /// The same ownership rule as update applies here.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> AppResult<()> {
        let existing = self
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found.".into()))?;

        if existing.user_id != caller_id {
            return Err(AppError::Forbidden("Not authorized.".into()));
        }

        self.image_store.delete_best_effort(&existing.image_url).await;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        log::info!("user {} deleted product {}", caller_id, id);
        Ok(())
    }

    async fn find_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, image_url, user_id, created_at, updated_at
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn product_service(pool: PgPool) -> ProductService {
        let dir = std::env::temp_dir().join(format!("product-images-{}", Uuid::new_v4()));
        ProductService::new(pool, Arc::new(ImageStore::new(dir)))
    }

    async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, 'hash', 'Owner')
             RETURNING id",
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn seed_product(pool: &PgPool, owner_id: Uuid) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO products (title, price, description, image_url, user_id)
             VALUES ('Desk lamp', 19.99, 'A lamp', 'images/lamp.png', $1)
             RETURNING id",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn test_update_by_non_owner_leaves_product_unchanged(pool: PgPool) {
        let service = product_service(pool.clone());
        let owner_id = seed_user(&pool, "owner@example.com").await;
        let intruder_id = seed_user(&pool, "intruder@example.com").await;
        let product_id = seed_product(&pool, owner_id).await;

        let form = ProductForm {
            title: Some("Hijacked".to_string()),
            price: Some("1.00".to_string()),
            description: Some("Not yours".to_string()),
            image: None,
        };

        let err = service.update(product_id, intruder_id, form).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // The rejected update must not have touched the row.
        let product = service.get(product_id).await.unwrap();
        assert_eq!(product.title, "Desk lamp");
        assert!((product.price - 19.99).abs() < f64::EPSILON);
        assert_eq!(product.user_id, owner_id);
    }

    #[sqlx::test]
    async fn test_delete_by_non_owner_keeps_product(pool: PgPool) {
        let service = product_service(pool.clone());
        let owner_id = seed_user(&pool, "owner@example.com").await;
        let intruder_id = seed_user(&pool, "intruder@example.com").await;
        let product_id = seed_product(&pool, owner_id).await;

        let err = service.delete(product_id, intruder_id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(service.get(product_id).await.is_ok());
    }

    #[test]
    fn test_resolve_fields_collects_every_violation() {
        let form = ProductForm {
            title: None,
            price: Some("free".to_string()),
            description: Some("   ".to_string()),
            image: None,
        };

        let (_, violations) = form.resolve_fields();
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().any(|v| v.field == "title"));
        assert!(violations.iter().any(|v| v.field == "price"));
        assert!(violations.iter().any(|v| v.field == "description"));
    }

    #[test]
    fn test_resolve_fields_accepts_valid_form() {
        let form = ProductForm {
            title: Some("Desk lamp".to_string()),
            price: Some("19.99".to_string()),
            description: Some("A lamp".to_string()),
            image: None,
        };

        let (fields, violations) = form.resolve_fields();
        assert!(violations.is_empty());
        assert_eq!(fields.title, "Desk lamp");
        assert!((fields.price - 19.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_fields_rejects_negative_price() {
        let form = ProductForm {
            title: Some("Desk lamp".to_string()),
            price: Some("-5".to_string()),
            description: Some("A lamp".to_string()),
            image: None,
        };

        let (_, violations) = form.resolve_fields();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "price");
    }
}
