use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts a row and returns it with the id the store assigned.
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;

    /// Returns the number of rows changed (0 when the id does not exist).
    async fn update_product(&self, req: &UpdateProductRequest) -> Result<u64, RepositoryError>;

    /// Returns the number of rows removed (0 when the id does not exist).
    async fn delete_product(&self, id: i32) -> Result<u64, RepositoryError>;
}
