use crate::abstract_trait::generator::OrderIdGeneratorTrait;
use anyhow::Result;
use shared::utils::generate_order_id;

#[derive(Debug, Clone, Default)]
pub struct UuidOrderIdGenerator;

impl OrderIdGeneratorTrait for UuidOrderIdGenerator {
    fn generate(&self) -> Result<String> {
        generate_order_id()
    }
}
