use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        event::CatalogEvent,
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
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
pub struct ProductCommandService {
    command: DynProductCommandRepository,
    publisher: EventPublisher,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        publisher: EventPublisher,
        registry: &mut Registry,
    ) -> Self {
        let tracer = OperationTracer::new(
            "product-command-service",
            "ProductCommandService",
            registry,
        );

        Self {
            command,
            publisher,
            tracer,
        }
    }

    /// The write is already committed at this point, so a failed publish is
    /// only logged.
    async fn announce(&self, event: CatalogEvent) {
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(
                product_id = event.product_id(),
                "⚠️ Failed to publish {:?}: {e}", event
            );
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let product = match self.command.create_product(req).await {
            Ok(product) => product,
            Err(e) => {
                let msg = format!("Failed to create product: {e}");
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, Method::Post, Status::Error, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        self.announce(CatalogEvent::Create {
            product_id: product.id,
        })
        .await;

        info!("✅ Product created with ID {}", product.id);
        self.tracer.complete(
            &tracing_ctx,
            Method::Post,
            Status::Success,
            "Product created",
        );

        Ok(ProductResponse::from(product))
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<(), ServiceError> {
        let tracing_ctx = self.tracer.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        let affected = match self.command.update_product(req).await {
            Ok(affected) => affected,
            Err(e) => {
                let msg = format!("Failed to update product {}: {e}", req.id);
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, Method::Put, Status::Error, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        if affected == 0 {
            info!("ℹ️ No product with ID {}, nothing updated", req.id);
        } else {
            self.announce(CatalogEvent::Update { product_id: req.id })
                .await;
        }

        self.tracer.complete(
            &tracing_ctx,
            Method::Put,
            Status::Success,
            "Product updated",
        );

        Ok(())
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let tracing_ctx = self.tracer.start(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let affected = match self.command.delete_product(id).await {
            Ok(affected) => affected,
            Err(e) => {
                let msg = format!("Failed to delete product {id}: {e}");
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, Method::Delete, Status::Error, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        if affected == 0 {
            info!("ℹ️ No product with ID {id}, nothing deleted");
        } else {
            self.announce(CatalogEvent::Delete { product_id: id }).await;
        }

        self.tracer.complete(
            &tracing_ctx,
            Method::Delete,
            Status::Success,
            "Product deleted",
        );

        Ok(())
    }
}
