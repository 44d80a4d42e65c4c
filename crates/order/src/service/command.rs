use crate::{
    abstract_trait::{
        generator::DynOrderIdGenerator,
        order::{repository::DynOrderCommandRepository, service::OrderCommandServiceTrait},
    },
    domain::{
        event::OrderEvent,
        requests::order::{CreateOrderRecordRequest, PlaceOrderRequest},
        response::order::PlaceOrderResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    service::EventPublisher,
    utils::{Method, OperationTracer, Status},
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    id_generator: DynOrderIdGenerator,
    publisher: EventPublisher,
    tracer: OperationTracer,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub id_generator: DynOrderIdGenerator,
    pub publisher: EventPublisher,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let OrderCommandServiceDeps {
            command,
            id_generator,
            publisher,
        } = deps;

        let tracer =
            OperationTracer::new("order-command-service", "OrderCommandService", registry);

        Self {
            command,
            id_generator,
            publisher,
            tracer,
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn place_order(
        &self,
        req: &PlaceOrderRequest,
    ) -> Result<PlaceOrderResponse, ServiceError> {
        info!("🏗️ Placing order with {} lines", req.products.len());

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "place_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "place_order"),
                KeyValue::new("order.line_count", req.products.len() as i64),
            ],
        );

        if req.products.is_empty() {
            self.tracer
                .complete(&tracing_ctx, method, Status::Error, "Order has no lines");
            return Err(ServiceError::Validation(vec![
                "products: order must contain at least one product".into(),
            ]));
        }

        let order_id = match self.id_generator.generate() {
            Ok(id) => id,
            Err(e) => {
                let msg = format!("Failed to generate order id: {e:#}");
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, method, Status::Error, &msg);
                return Err(ServiceError::Internal("Failed to generate order id".into()));
            }
        };

        let record = CreateOrderRecordRequest {
            order_id: order_id.clone(),
            lines: req.products.clone(),
            customer_info: req.customer_info.clone(),
        };

        let rows = match self.command.create_order(&record).await {
            Ok(rows) => rows,
            Err(e) => {
                let msg = format!("Failed to store order {order_id}: {e}");
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, method, Status::Error, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let event = OrderEvent::PlaceOrder {
            order_id: order_id.clone(),
        };
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(order_id = %order_id, "⚠️ Failed to publish order event: {e}");
        }

        self.tracer.complete(
            &tracing_ctx,
            method,
            Status::Success,
            &format!("Order {order_id} placed"),
        );

        Ok(PlaceOrderResponse {
            order_id,
            line_count: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            generator::OrderIdGeneratorTrait, order::repository::OrderCommandRepositoryTrait,
        },
        domain::requests::order::OrderLineRequest,
        generator::UuidOrderIdGenerator,
        model::order::Order as OrderModel,
    };
    use chrono::Utc;
    use serde_json::json;
    use shared::{config::MemoryQueue, errors::RepositoryError};
    use std::{sync::Arc, time::Duration};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FakeRepository {
        rows: Mutex<Vec<OrderModel>>,
        broken: bool,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeRepository {
        async fn create_order(
            &self,
            req: &CreateOrderRecordRequest,
        ) -> Result<Vec<OrderModel>, RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
            }

            let mut rows = self.rows.lock().await;
            let mut written = Vec::new();
            for line in &req.lines {
                let row = OrderModel {
                    id: rows.len() as i64 + 1,
                    order_id: req.order_id.clone(),
                    product_id: line.product_id,
                    quantity: line.quantity,
                    customer_info: req.customer_info.clone(),
                    created_at: Utc::now().naive_utc(),
                };
                rows.push(row.clone());
                written.push(row);
            }
            Ok(written)
        }
    }

    struct FixedIdGenerator(&'static str);

    impl OrderIdGeneratorTrait for FixedIdGenerator {
        fn generate(&self) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenIdGenerator;

    impl OrderIdGeneratorTrait for BrokenIdGenerator {
        fn generate(&self) -> anyhow::Result<String> {
            anyhow::bail!("entropy source unavailable")
        }
    }

    fn build(
        repo: Arc<FakeRepository>,
        id_generator: DynOrderIdGenerator,
    ) -> (OrderCommandService, Arc<MemoryQueue>) {
        let queue = Arc::new(MemoryQueue::new());
        let mut registry = Registry::default();
        let service = OrderCommandService::new(
            OrderCommandServiceDeps {
                command: repo,
                id_generator,
                publisher: EventPublisher::new(queue.clone(), Duration::from_secs(1)),
            },
            &mut registry,
        );
        (service, queue)
    }

    fn two_lines() -> PlaceOrderRequest {
        PlaceOrderRequest {
            products: vec![
                OrderLineRequest {
                    product_id: 1,
                    quantity: 2,
                },
                OrderLineRequest {
                    product_id: 2,
                    quantity: 1,
                },
            ],
            customer_info: "Jane, 1 Main St".into(),
        }
    }

    #[tokio::test]
    async fn test_place_order_writes_one_row_per_line() {
        let repo = Arc::new(FakeRepository::default());
        let (service, queue) = build(repo.clone(), Arc::new(FixedIdGenerator("order-1")));

        let response = service.place_order(&two_lines()).await.unwrap();

        assert_eq!(response.order_id, "order-1");
        assert_eq!(response.line_count, 2);

        let rows = repo.rows.lock().await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.order_id == "order-1"));
        assert!(rows.iter().all(|r| r.customer_info == "Jane, 1 Main St"));

        let bodies = queue.bodies().await;
        assert_eq!(bodies.len(), 1);
        let event: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(
            event,
            json!({ "event_type": "place_order", "order_id": "order-1" })
        );
    }

    #[tokio::test]
    async fn test_orders_get_distinct_ids() {
        let repo = Arc::new(FakeRepository::default());
        let (service, _queue) = build(repo, Arc::new(UuidOrderIdGenerator));

        let a = service.place_order(&two_lines()).await.unwrap();
        let b = service.place_order(&two_lines()).await.unwrap();

        assert_ne!(a.order_id, b.order_id);
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let repo = Arc::new(FakeRepository::default());
        let (service, queue) = build(repo.clone(), Arc::new(UuidOrderIdGenerator));

        let result = service
            .place_order(&PlaceOrderRequest {
                products: Vec::new(),
                customer_info: "nobody".into(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.rows.lock().await.is_empty());
        assert!(queue.bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_id_generation_failure_writes_nothing() {
        let repo = Arc::new(FakeRepository::default());
        let (service, queue) = build(repo.clone(), Arc::new(BrokenIdGenerator));

        let result = service.place_order(&two_lines()).await;

        assert!(matches!(result, Err(ServiceError::Internal(_))));
        assert!(repo.rows.lock().await.is_empty());
        assert!(queue.bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_publishes_nothing() {
        let repo = Arc::new(FakeRepository {
            broken: true,
            ..Default::default()
        });
        let (service, queue) = build(repo, Arc::new(UuidOrderIdGenerator));

        let result = service.place_order(&two_lines()).await;

        assert!(matches!(result, Err(ServiceError::Repo(_))));
        assert!(queue.bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_queue_outage_does_not_fail_order() {
        let repo = Arc::new(FakeRepository::default());
        let (service, queue) = build(repo.clone(), Arc::new(UuidOrderIdGenerator));
        queue.set_fail_on_send(true);

        let response = service.place_order(&two_lines()).await.unwrap();

        assert_eq!(response.line_count, 2);
        assert_eq!(repo.rows.lock().await.len(), 2);
    }
}
