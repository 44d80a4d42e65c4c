use crate::{abstract_trait::DynQueue, errors::ServiceError};
use serde::Serialize;
use std::{fmt, time::Duration};
use tracing::debug;

/// Serializes events as JSON and sends them to the queue under a deadline.
#[derive(Clone)]
pub struct EventPublisher {
    queue: DynQueue,
    timeout: Duration,
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EventPublisher {
    pub fn new(queue: DynQueue, timeout: Duration) -> Self {
        Self { queue, timeout }
    }

    pub async fn publish<E>(&self, event: &E) -> Result<(), ServiceError>
    where
        E: Serialize + fmt::Debug + Sync,
    {
        let payload = serde_json::to_string(event)
            .map_err(|e| ServiceError::Internal(format!("failed to encode event: {e}")))?;

        match tokio::time::timeout(self.timeout, self.queue.send(&payload)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ServiceError::Queue(format!(
                    "publish timed out after {:?}",
                    self.timeout
                )));
            }
        }

        debug!(?event, "📤 Event published");
        Ok(())
    }
}
