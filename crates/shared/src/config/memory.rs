use crate::{
    abstract_trait::{MAX_RECEIVE_BATCH, QueueTrait},
    domain::QueueMessage,
    errors::ServiceError,
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, VecDeque},
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;

/// In-process queue for local runs and tests.
#[derive(Default)]
pub struct MemoryQueue {
    state: Mutex<MemoryQueueState>,
    fail_on_send: AtomicBool,
}

#[derive(Default)]
struct MemoryQueueState {
    pending: VecDeque<(String, String)>,
    in_flight: HashMap<String, String>,
    next_id: u64,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_send(&self, fail: bool) {
        self.fail_on_send.store(fail, Ordering::SeqCst);
    }

    /// Bodies of messages not yet received, oldest first.
    pub async fn bodies(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.pending.iter().map(|(_, body)| body.clone()).collect()
    }
}

#[async_trait]
impl QueueTrait for MemoryQueue {
    async fn send(&self, payload: &str) -> Result<(), ServiceError> {
        if self.fail_on_send.load(Ordering::SeqCst) {
            return Err(ServiceError::Queue("memory queue rejected message".into()));
        }

        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = format!("memory-{}", state.next_id);
        state.pending.push_back((id, payload.to_string()));
        Ok(())
    }

    async fn receive(&self, max: i32) -> Result<Vec<QueueMessage>, ServiceError> {
        let max = max.clamp(1, MAX_RECEIVE_BATCH) as usize;
        let mut state = self.state.lock().await;

        let mut messages = Vec::new();
        while messages.len() < max {
            let Some((id, body)) = state.pending.pop_front() else {
                break;
            };
            state.in_flight.insert(id.clone(), body.clone());
            messages.push(QueueMessage {
                message_id: Some(id.clone()),
                body,
                receipt_handle: id,
            });
        }

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), ServiceError> {
        let mut state = self.state.lock().await;
        state
            .in_flight
            .remove(receipt_handle)
            .map(|_| ())
            .ok_or_else(|| ServiceError::Queue(format!("unknown receipt handle: {receipt_handle}")))
    }
}
