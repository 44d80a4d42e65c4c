use crate::{
    abstract_trait::{MAX_RECEIVE_BATCH, QueueTrait},
    domain::QueueMessage,
    errors::ServiceError,
};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use rdkafka::{
    Message, Offset, TopicPartitionList,
    config::ClientConfig,
    consumer::{CommitMode, Consumer, StreamConsumer},
    producer::{FutureProducer, FutureRecord, Producer},
};
use std::{fmt, str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
}

/// Kafka topic used as a queue.
///
/// Receipt handles have the form `topic:partition:offset`; deleting a message
/// commits the consumer group offset past it.
pub struct KafkaQueue {
    producer: FutureProducer,
    consumer: StreamConsumer,
    topic: String,
    poll_timeout: Duration,
}

impl KafkaQueue {
    pub async fn connect(config: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "6000")
            .create()
            .context("Failed to create Kafka producer")?;

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()
            .context("Failed to create Kafka consumer")?;

        let metadata_producer = producer.clone();
        let topic = config.topic.clone();
        let topic_exists = tokio::task::spawn_blocking(move || {
            metadata_producer
                .client()
                .fetch_metadata(Some(&topic), Duration::from_secs(10))
                .map(|metadata| {
                    metadata
                        .topics()
                        .iter()
                        .any(|t| t.name() == topic && t.error().is_none())
                })
        })
        .await
        .context("Kafka metadata task failed")?
        .with_context(|| format!("Failed to fetch metadata for topic '{}'", config.topic))?;

        if !topic_exists {
            bail!("Kafka topic '{}' does not exist", config.topic);
        }

        consumer
            .subscribe(&[config.topic.as_str()])
            .with_context(|| format!("Failed to subscribe to topic '{}'", config.topic))?;

        info!(
            topic = %config.topic,
            group_id = %config.group_id,
            "✅ Connected to Kafka topic"
        );

        Ok(Self {
            producer,
            consumer,
            topic: config.topic.clone(),
            poll_timeout: Duration::from_secs(1),
        })
    }
}

#[async_trait]
impl QueueTrait for KafkaQueue {
    async fn send(&self, payload: &str) -> Result<(), ServiceError> {
        let record = FutureRecord::<(), str>::to(&self.topic).payload(payload);

        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map_err(|(err, _)| ServiceError::from(err))?;

        debug!(topic = %self.topic, "Message sent");
        Ok(())
    }

    async fn receive(&self, max: i32) -> Result<Vec<QueueMessage>, ServiceError> {
        let max = max.clamp(1, MAX_RECEIVE_BATCH) as usize;
        let mut messages = Vec::with_capacity(max);

        while messages.len() < max {
            let message = match tokio::time::timeout(self.poll_timeout, self.consumer.recv()).await
            {
                Err(_) => break,
                Ok(result) => result.map_err(ServiceError::from)?,
            };

            let receipt = KafkaReceipt {
                topic: message.topic().to_string(),
                partition: message.partition(),
                offset: message.offset(),
            };

            messages.push(QueueMessage {
                message_id: None,
                body: String::from_utf8_lossy(message.payload().unwrap_or_default()).into_owned(),
                receipt_handle: receipt.to_string(),
            });
        }

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), ServiceError> {
        let receipt: KafkaReceipt = receipt_handle.parse()?;

        let mut offsets = TopicPartitionList::new();
        offsets.add_partition_offset(
            &receipt.topic,
            receipt.partition,
            Offset::Offset(receipt.offset + 1),
        )?;

        self.consumer.commit(&offsets, CommitMode::Async)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KafkaReceipt {
    topic: String,
    partition: i32,
    offset: i64,
}

impl fmt::Display for KafkaReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.topic, self.partition, self.offset)
    }
}

impl FromStr for KafkaReceipt {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ServiceError::Queue(format!("invalid Kafka receipt handle: {s}"));

        let mut parts = s.rsplitn(3, ':');
        let offset = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let partition = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let topic = parts.next().filter(|t| !t.is_empty()).ok_or_else(invalid)?;

        Ok(Self {
            topic: topic.to_string(),
            partition,
            offset,
        })
    }
}
