//! Messaging client abstraction.

use async_trait::async_trait;
use tonic::Status;

use crate::pubsub::proto::PubsubMessage;
use crate::pubsub::types::{resource_segment, TopicName, TOPIC_ID_SEGMENT};
use crate::Result;

/// Handle to a Pub/Sub topic.
///
/// A handle is a local reference: creating one performs no I/O, and the topic is
/// only contacted when a message is published to it. Messages published through
/// a handle are sent one per request as soon as they are handed over; there is
/// no delay threshold holding them back for batching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
}

impl Topic {
    /// Create a handle for `topic_id` within `project`.
    pub fn new(project: &str, topic_id: &str) -> Self {
        Self {
            name: TopicName::new(project, topic_id).to_string(),
        }
    }

    /// Fully-qualified resource name, `projects/{project}/topics/{topic}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Topic ID as found at the fixed topic segment of the resource name.
    pub fn id(&self) -> Option<&str> {
        resource_segment(&self.name, TOPIC_ID_SEGMENT)
    }

    /// Whether this handle addresses the topic with the given ID.
    pub fn matches_id(&self, topic_id: &str) -> bool {
        self.id() == Some(topic_id)
    }
}

/// Messaging client used by a producer.
///
/// Implementations must be safe to share between concurrent publishes.
#[async_trait]
pub trait PubSubClient: Send + Sync {
    /// Project the client is bound to.
    fn project_id(&self) -> &str;

    /// Resolve a topic handle by ID.
    fn topic(&self, topic_id: &str) -> Topic {
        Topic::new(self.project_id(), topic_id)
    }

    /// Publish a single message and wait for the server-assigned message ID.
    async fn publish(&self, topic: &Topic, message: PubsubMessage) -> std::result::Result<String, Status>;

    /// Release the client's resources.
    async fn close(&self) -> Result<()>;
}
