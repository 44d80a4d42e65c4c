use anyhow::Result;
use std::sync::Arc;

pub type DynOrderIdGenerator = Arc<dyn OrderIdGeneratorTrait + Send + Sync>;

pub trait OrderIdGeneratorTrait {
    fn generate(&self) -> Result<String>;
}
