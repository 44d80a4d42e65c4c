use apigateway::{di::DependenciesInjectDeps, handler::AppRouter, state::AppState};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use order::{
    abstract_trait::{
        generator::OrderIdGeneratorTrait, order::repository::OrderCommandRepositoryTrait,
    },
    domain::requests::order::CreateOrderRecordRequest,
    generator::UuidOrderIdGenerator,
    model::order::Order as OrderModel,
};
use product::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use shared::{
    abstract_trait::{DynQueue, QueueTrait},
    config::MemoryQueue,
    domain::QueueMessage,
    errors::{RepositoryError, ServiceError},
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::Mutex;

/// Stands in for Postgres: products and order rows kept in memory.
#[derive(Default)]
pub struct InMemoryStore {
    pub products: Mutex<Vec<ProductModel>>,
    pub orders: Mutex<Vec<OrderModel>>,
    next_product_id: Mutex<i32>,
    pub broken: AtomicBool,
}

impl InMemoryStore {
    fn check(&self) -> Result<(), RepositoryError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        self.check()?;
        let mut products = self.products.lock().await.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryStore {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        self.check()?;
        let mut next_id = self.next_product_id.lock().await;
        *next_id += 1;
        let product = ProductModel {
            id: *next_id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price.clone(),
            category: req.category.clone(),
        };
        self.products.lock().await.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut products = self.products.lock().await;
        match products.iter_mut().find(|p| p.id == req.id) {
            Some(product) => {
                product.name = req.name.clone();
                product.description = req.description.clone();
                product.price = req.price.clone();
                product.category = req.category.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_product(&self, id: i32) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut products = self.products.lock().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        self.check()?;
        let mut orders = self.orders.lock().await;
        let rows: Vec<OrderModel> = req
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| OrderModel {
                id: (orders.len() + i + 1) as i64,
                order_id: req.order_id.clone(),
                product_id: line.product_id,
                quantity: line.quantity,
                customer_info: req.customer_info.clone(),
                created_at: chrono::Utc::now().naive_utc(),
            })
            .collect();
        orders.extend(rows.iter().cloned());
        Ok(rows)
    }
}

pub struct BrokenIdGenerator;

impl OrderIdGeneratorTrait for BrokenIdGenerator {
    fn generate(&self) -> anyhow::Result<String> {
        anyhow::bail!("entropy source unavailable")
    }
}

/// A queue whose `send` never completes.
pub struct StalledQueue;

#[async_trait]
impl QueueTrait for StalledQueue {
    async fn send(&self, _payload: &str) -> Result<(), ServiceError> {
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn receive(&self, _max: i32) -> Result<Vec<QueueMessage>, ServiceError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), ServiceError> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub queue: Arc<MemoryQueue>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(UuidOrderIdGenerator))
    }

    pub fn with_id_generator(
        id_generator: Arc<dyn OrderIdGeneratorTrait + Send + Sync>,
    ) -> Self {
        let queue = Arc::new(MemoryQueue::new());
        Self::build(
            id_generator,
            queue.clone(),
            queue,
            Duration::from_secs(1),
            Duration::from_secs(5),
        )
    }

    /// Publishes through `sink` instead of the recording queue, so `events()`
    /// stays empty.
    pub fn with_queue(sink: DynQueue, publish_timeout: Duration, request_timeout: Duration) -> Self {
        Self::build(
            Arc::new(UuidOrderIdGenerator),
            Arc::new(MemoryQueue::new()),
            sink,
            publish_timeout,
            request_timeout,
        )
    }

    fn build(
        id_generator: Arc<dyn OrderIdGeneratorTrait + Send + Sync>,
        queue: Arc<MemoryQueue>,
        sink: DynQueue,
        publish_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        let store = Arc::new(InMemoryStore::default());

        let deps = DependenciesInjectDeps {
            product_command: store.clone(),
            product_query: store.clone(),
            order_command: store.clone(),
            id_generator,
            queue: sink,
            publish_timeout,
        };

        let router = AppRouter::build(AppState::new(deps, request_timeout));

        Self {
            router,
            store,
            queue,
        }
    }

    pub async fn events(&self) -> Vec<serde_json::Value> {
        self.queue
            .bodies()
            .await
            .iter()
            .map(|body| serde_json::from_str(body).unwrap())
            .collect()
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
