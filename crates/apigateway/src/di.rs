use order::{
    abstract_trait::{
        generator::DynOrderIdGenerator,
        order::{repository::DynOrderCommandRepository, service::DynOrderCommandService},
    },
    generator::UuidOrderIdGenerator,
    repository::OrderCommandRepository,
    service::{OrderCommandService, OrderCommandServiceDeps},
};
use product::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{DynProductCommandService, DynProductQueryService},
    },
    repository::{ProductCommandRepository, ProductQueryRepository},
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::{abstract_trait::DynQueue, config::ConnectionPool, service::EventPublisher};
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_command: DynProductCommandService,
    pub product_query: DynProductQueryService,
    pub order_command: DynOrderCommandService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_command", &"DynProductCommandService")
            .field("product_query", &"DynProductQueryService")
            .field("order_command", &"DynOrderCommandService")
            .finish()
    }
}

/// Everything the services need from the outside world.
pub struct DependenciesInjectDeps {
    pub product_command: DynProductCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub id_generator: DynOrderIdGenerator,
    pub queue: DynQueue,
    pub publish_timeout: Duration,
}

impl DependenciesInjectDeps {
    pub fn postgres(pool: ConnectionPool, queue: DynQueue, publish_timeout: Duration) -> Self {
        Self {
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool)),
            id_generator: Arc::new(UuidOrderIdGenerator),
            queue,
            publish_timeout,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            product_command,
            product_query,
            order_command,
            id_generator,
            queue,
            publish_timeout,
        } = deps;

        let publisher = EventPublisher::new(queue, publish_timeout);

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            product_command,
            publisher.clone(),
            registry,
        ));

        let product_query: DynProductQueryService =
            Arc::new(ProductQueryService::new(product_query, registry));

        let order_command: DynOrderCommandService = Arc::new(OrderCommandService::new(
            OrderCommandServiceDeps {
                command: order_command,
                id_generator,
                publisher,
            },
            registry,
        ));

        Self {
            product_command,
            product_query,
            order_command,
        }
    }
}
