//! In-memory messaging client.
//!
//! Records every published message instead of sending it anywhere. Failures can
//! be scripted per publish and for close, which makes it the client of choice for
//! exercising a producer without a Pub/Sub service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tonic::Status;
use tracing::debug;

use crate::pubsub::client::{PubSubClient, Topic};
use crate::pubsub::proto::PubsubMessage;
use crate::{Error, Result};

/// A message accepted by the in-memory client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    /// Fully-qualified topic name.
    pub topic: String,
    /// Message payload.
    pub data: Vec<u8>,
    /// Server-assigned message ID.
    pub message_id: String,
}

/// In-memory Pub/Sub client.
#[derive(Clone)]
pub struct InMemoryClient {
    inner: Arc<InMemoryClientInner>,
}

struct InMemoryClientInner {
    project_id: String,
    /// Accepted messages in publish order.
    published: Mutex<Vec<PublishedMessage>>,
    /// Errors returned by the next publishes, oldest first.
    failures: Mutex<VecDeque<Status>>,
    /// Error returned by the next close.
    close_error: Mutex<Option<String>>,
    closed: AtomicBool,
    next_id: AtomicU64,
}

impl InMemoryClient {
    /// Create a client bound to `project_id`.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(InMemoryClientInner {
                project_id: project_id.into(),
                published: Mutex::new(Vec::new()),
                failures: Mutex::new(VecDeque::new()),
                close_error: Mutex::new(None),
                closed: AtomicBool::new(false),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Make the next publish fail with `status`.
    pub async fn fail_next_publish(&self, status: Status) {
        self.inner.failures.lock().await.push_back(status);
    }

    /// Make the next close fail with `message`.
    pub async fn fail_close(&self, message: impl Into<String>) {
        *self.inner.close_error.lock().await = Some(message.into());
    }

    /// Messages accepted so far.
    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.inner.published.lock().await.clone()
    }

    /// Whether close has been called successfully.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl PubSubClient for InMemoryClient {
    fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    async fn publish(&self, topic: &Topic, message: PubsubMessage) -> std::result::Result<String, Status> {
        if self.is_closed() {
            return Err(Status::failed_precondition("Pub/Sub client is closed"));
        }
        if let Some(status) = self.inner.failures.lock().await.pop_front() {
            return Err(status);
        }

        let message_id = self.inner.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        debug!("Publish: message {} to {}", message_id, topic.name());

        self.inner.published.lock().await.push(PublishedMessage {
            topic: topic.name().to_string(),
            data: message.data,
            message_id: message_id.clone(),
        });

        Ok(message_id)
    }

    async fn close(&self) -> Result<()> {
        if let Some(message) = self.inner.close_error.lock().await.take() {
            return Err(Error::Teardown(message));
        }
        self.inner.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_records_messages() {
        let client = InMemoryClient::new("p");
        let topic = client.topic("orders");

        let first = client
            .publish(&topic, PubsubMessage { data: b"one".to_vec(), ..Default::default() })
            .await
            .unwrap();
        let second = client
            .publish(&topic, PubsubMessage { data: b"two".to_vec(), ..Default::default() })
            .await
            .unwrap();
        assert_ne!(first, second);

        let published = client.published().await;
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].topic, "projects/p/topics/orders");
        assert_eq!(published[0].data, b"one");
        assert_eq!(published[1].message_id, second);
    }

    #[tokio::test]
    async fn test_scripted_failures_are_consumed_in_order() {
        let client = InMemoryClient::new("p");
        let topic = client.topic("orders");
        client.fail_next_publish(Status::unavailable("down")).await;
        client.fail_next_publish(Status::not_found("gone")).await;

        let err = client.publish(&topic, PubsubMessage::default()).await.unwrap_err();
        assert_eq!(err.code(), tonic::Code::Unavailable);
        let err = client.publish(&topic, PubsubMessage::default()).await.unwrap_err();
        assert_eq!(err.code(), tonic::Code::NotFound);
        assert!(client.publish(&topic, PubsubMessage::default()).await.is_ok());
        assert_eq!(client.published().await.len(), 1);
    }

    #[tokio::test]
    async fn test_close() {
        let client = InMemoryClient::new("p");
        client.fail_close("socket busy").await;
        assert!(matches!(client.close().await, Err(Error::Teardown(_))));
        assert!(!client.is_closed());

        client.close().await.unwrap();
        assert!(client.is_closed());
        let err = client
            .publish(&client.topic("orders"), PubsubMessage::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::FailedPrecondition);
    }
}
