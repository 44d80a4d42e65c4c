use crate::{domain::requests::order::CreateOrderRecordRequest, model::order::Order as OrderModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Writes one row per line, all or nothing.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<Vec<OrderModel>, RepositoryError>;
}
