use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::product::ProductResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer, Status},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let tracer =
            OperationTracer::new("product-query-service", "ProductQueryService", registry);

        Self { query, tracer }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        match self.query.find_all().await {
            Ok(products) => {
                info!("✅ Retrieved {} products", products.len());
                self.tracer.complete(
                    &tracing_ctx,
                    Method::Get,
                    Status::Success,
                    "Products retrieved",
                );
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(e) => {
                let msg = format!("Failed to fetch products: {e}");
                error!("❌ {msg}");
                self.tracer
                    .complete(&tracing_ctx, Method::Get, Status::Error, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}
