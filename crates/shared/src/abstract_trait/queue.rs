use crate::{domain::QueueMessage, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

/// Upper bound for a single `receive` call, matching the SQS batch limit.
pub const MAX_RECEIVE_BATCH: i32 = 10;

pub type DynQueue = Arc<dyn QueueTrait + Send + Sync>;

/// A single pre-resolved queue destination.
#[async_trait]
pub trait QueueTrait {
    async fn send(&self, payload: &str) -> Result<(), ServiceError>;

    /// Returns at most `max` messages; `max` is clamped to `1..=MAX_RECEIVE_BATCH`.
    async fn receive(&self, max: i32) -> Result<Vec<QueueMessage>, ServiceError>;

    async fn delete(&self, receipt_handle: &str) -> Result<(), ServiceError>;
}
