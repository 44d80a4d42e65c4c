use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecordRequest, model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        info!(
            "🏗️ Writing order {} with {} lines",
            req.order_id,
            req.lines.len()
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut rows = Vec::with_capacity(req.lines.len());

        for line in &req.lines {
            let inserted = sqlx::query_as::<_, OrderModel>(
                r#"
                INSERT INTO orders (order_id, product_id, quantity, customer_info)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, customer_info, created_at
                "#,
            )
            .bind(&req.order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(&req.customer_info)
            .fetch_one(&mut *tx)
            .await;

            match inserted {
                Ok(row) => rows.push(row),
                Err(e) => {
                    error!(
                        "❌ Failed to insert line (product {}) of order {}: {:?}",
                        line.product_id, req.order_id, e
                    );
                    if let Err(rollback_err) = tx.rollback().await {
                        error!("❌ Rollback of order {} failed: {:?}", req.order_id, rollback_err);
                    }
                    return Err(RepositoryError::from(e));
                }
            }
        }

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit order {}: {:?}", req.order_id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Order {} stored", req.order_id);
        Ok(rows)
    }
}
