use crate::{
    abstract_trait::{MAX_RECEIVE_BATCH, QueueTrait},
    domain::QueueMessage,
    errors::ServiceError,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::{Client as SqsClient, config::Credentials, error::DisplayErrorContext};
use std::fmt;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SqsConfig {
    pub queue_name: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint, e.g. LocalStack.
    pub endpoint_url: Option<String>,
}

impl fmt::Debug for SqsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqsConfig")
            .field("queue_name", &self.queue_name)
            .field("region", &self.region)
            .field("access_key_id", &"***")
            .field("secret_access_key", &"***")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// SQS queue whose URL is resolved once from its name at startup.
pub struct SqsQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsQueue {
    pub async fn connect(config: &SqsConfig) -> Result<Self> {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "environment",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = SqsClient::new(&sdk_config);

        let output = client
            .get_queue_url()
            .queue_name(&config.queue_name)
            .send()
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to resolve SQS queue '{}': {}",
                    config.queue_name,
                    DisplayErrorContext(&e)
                )
            })?;

        let queue_url = output
            .queue_url()
            .ok_or_else(|| anyhow!("SQS returned no URL for queue '{}'", config.queue_name))?
            .to_string();

        info!(
            queue = %config.queue_name,
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "✅ Connected to SQS queue"
        );

        Ok(Self { client, queue_url })
    }
}

#[async_trait]
impl QueueTrait for SqsQueue {
    async fn send(&self, payload: &str) -> Result<(), ServiceError> {
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(payload)
            .send()
            .await
            .map_err(|e| {
                ServiceError::Queue(format!(
                    "failed to send message to SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(queue_url = %self.queue_url, "Message sent");
        Ok(())
    }

    async fn receive(&self, max: i32) -> Result<Vec<QueueMessage>, ServiceError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max.clamp(1, MAX_RECEIVE_BATCH))
            .send()
            .await
            .map_err(|e| {
                ServiceError::Queue(format!(
                    "failed to receive messages from SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let messages = output
            .messages()
            .iter()
            .filter_map(|message| {
                let receipt_handle = message.receipt_handle()?;
                Some(QueueMessage {
                    message_id: message.message_id().map(str::to_string),
                    body: message.body().unwrap_or_default().to_string(),
                    receipt_handle: receipt_handle.to_string(),
                })
            })
            .collect();

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), ServiceError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| {
                ServiceError::Queue(format!(
                    "failed to delete message from SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}
