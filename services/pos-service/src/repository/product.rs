// /pos-dashboard/services/pos-service/src/repository/product.rs

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    models::*,
    utils::error::{AppError, AppResult},
};

const PRODUCT_COLUMNS: &str = "id, name, price, image_url, category_id, created_at, updated_at";

/// Repository untuk product operations
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List product beserta category-nya, terbaru dulu
    pub async fn list_with_category(&self) -> AppResult<Vec<ProductWithCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.price, p.image_url,
                   c.id AS category_id, c.name AS category_name
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|row| -> Result<ProductWithCategory, sqlx::Error> {
                Ok(ProductWithCategory {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    price: row.try_get("price")?,
                    image_url: row.try_get("image_url")?,
                    category: CategoryRef {
                        id: row.try_get("category_id")?,
                        name: row.try_get("category_name")?,
                    },
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Ambil product berdasarkan daftar id, id yang tidak ada diabaikan
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ANY($1)",
            PRODUCT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(products)
    }

    pub async fn create(
        &self,
        name: &str,
        price: i64,
        category_id: Uuid,
        image_url: &str,
    ) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (id, name, price, category_id, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(category_id)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Update product, image_url lama dipertahankan kalau None
    pub async fn update(
        &self,
        product_id: Uuid,
        name: &str,
        price: i64,
        category_id: Uuid,
        image_url: Option<&str>,
    ) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2,
                price = $3,
                category_id = $4,
                image_url = COALESCE($5, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(name)
        .bind(price)
        .bind(category_id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product tidak ditemukan".to_string()))
    }

    /// Hard delete, ditolak kalau product sudah pernah masuk order
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict(_) => AppError::Conflict(
                    "Product sudah dipakai di order dan tidak bisa dihapus".to_string(),
                ),
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product tidak ditemukan".to_string()));
        }

        Ok(())
    }
}
