use crate::{
    abstract_trait::DynQueue,
    config::{KafkaConfig, KafkaQueue, MemoryQueue, SqsConfig, SqsQueue},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::warn;

/// Which queue the publisher talks to. Resolved once at startup.
#[derive(Debug, Clone)]
pub enum QueueConfig {
    Sqs(SqsConfig),
    Kafka(KafkaConfig),
    Memory,
}

impl QueueConfig {
    pub async fn connect(&self) -> Result<DynQueue> {
        let queue = match self {
            QueueConfig::Sqs(config) => Arc::new(
                SqsQueue::connect(config)
                    .await
                    .context("Failed to connect to SQS")?,
            ) as DynQueue,
            QueueConfig::Kafka(config) => Arc::new(
                KafkaQueue::connect(config)
                    .await
                    .context("Failed to connect to Kafka")?,
            ) as DynQueue,
            QueueConfig::Memory => {
                warn!("⚠️ Using in-memory queue; events are not delivered outside this process");
                Arc::new(MemoryQueue::new()) as DynQueue
            }
        };

        Ok(queue)
    }
}
