use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, category
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product '{}': {:?}", req.name, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created product ID {}", product.id);
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<u64, RepositoryError> {
        info!("🔄 Updating product: {}", req.id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1,
                description = $2,
                price = $3,
                category = $4
            WHERE id = $5
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.category)
        .bind(req.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {}: {:?}", req.id, e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_product(&self, id: i32) -> Result<u64, RepositoryError> {
        info!("🗑️ Deleting product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected())
    }
}
