//! Producer lifecycle and the publish path.
//!
//! A [`Producer`] is built once per destination configuration. It owns the
//! messaging client and the topic bindings resolved from the event-to-topic map,
//! and publishes one event envelope per call through the [`Publisher`] trait.
//! Every publish yields an [`Outcome`]; per-event failures never escape as
//! errors.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::{ClientSettings, DestinationConfig};
use crate::error::{Error, Result};
use crate::metrics::get_metrics;
use crate::pubsub::client::{PubSubClient, Topic};
use crate::pubsub::grpc::GrpcClient;
use crate::pubsub::outcome::{DeliveryError, Outcome};
use crate::pubsub::proto::PubsubMessage;
use crate::types::{validate_message_size, validate_topic_id, PUBSUB_MAX_MESSAGE_SIZE};

/// Publishes event envelopes to a destination.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one raw JSON envelope and report the outcome.
    async fn publish(&self, event: &[u8]) -> Outcome;
}

/// Publish through `producer`, or fail the event when the host has none.
pub async fn produce(event: &[u8], producer: Option<&dyn Publisher>) -> Outcome {
    match producer {
        Some(producer) => producer.publish(event).await,
        None => Outcome::from(DeliveryError::ProducerUnavailable),
    }
}

/// An event name bound to a resolved topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBinding {
    event: String,
    topic: Topic,
}

impl TopicBinding {
    /// Event name, possibly empty.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Topic handle.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }
}

/// Pub/Sub producer for one destination.
pub struct Producer {
    /// `None` once the producer has been closed.
    client: RwLock<Option<Arc<dyn PubSubClient>>>,
    bindings: Vec<TopicBinding>,
}

impl Producer {
    /// Build a producer from the host's destination configuration.
    ///
    /// Connects to the Pub/Sub service, or to the emulator named by
    /// `PUBSUB_EMULATOR_HOST`.
    pub async fn new(destination_config: &Value) -> Result<Self> {
        Self::with_settings(destination_config, &ClientSettings::from_env()).await
    }

    /// Build a producer with explicit client settings.
    pub async fn with_settings(destination_config: &Value, settings: &ClientSettings) -> Result<Self> {
        let config = DestinationConfig::from_value(destination_config)?;
        config.validate()?;

        let client = GrpcClient::connect(&config.project_id, &config.credentials, settings)?;
        Ok(Self::bind(&config, Arc::new(client)))
    }

    /// Build a producer around an existing messaging client.
    pub fn with_client(destination_config: &Value, client: Arc<dyn PubSubClient>) -> Result<Self> {
        let config = DestinationConfig::from_value(destination_config)?;
        config.validate()?;

        Ok(Self::bind(&config, client))
    }

    fn bind(config: &DestinationConfig, client: Arc<dyn PubSubClient>) -> Self {
        let bindings: Vec<TopicBinding> = config
            .event_to_topic_map
            .iter()
            .map(|mapping| {
                if let Err(e) = validate_topic_id(&mapping.to) {
                    warn!(event = %mapping.from, topic = %mapping.to, "Suspicious topic in eventToTopicMap: {}", e);
                }
                TopicBinding {
                    event: mapping.from.clone(),
                    topic: client.topic(&mapping.to),
                }
            })
            .collect();

        info!(
            project = %client.project_id(),
            bindings = bindings.len(),
            "Created Google Pub/Sub producer"
        );
        get_metrics().active_producers.inc();

        Self {
            client: RwLock::new(Some(client)),
            bindings,
        }
    }

    /// Topic bindings in configuration order.
    pub fn bindings(&self) -> &[TopicBinding] {
        &self.bindings
    }

    /// First topic bound to `event`.
    pub fn topic_for_event(&self, event: &str) -> Option<&Topic> {
        self.bindings
            .iter()
            .find(|binding| binding.event == event)
            .map(|binding| &binding.topic)
    }

    /// First topic whose ID is `topic_id`.
    pub fn topic_by_id(&self, topic_id: &str) -> Option<&Topic> {
        self.bindings
            .iter()
            .map(|binding| &binding.topic)
            .find(|topic| topic.matches_id(topic_id))
    }

    /// Whether the producer still owns its client.
    pub async fn is_open(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Release the messaging client.
    ///
    /// Fails with [`Error::InvalidHandle`] when the producer was already closed.
    /// A failed release is logged and returned; the client is not retained.
    pub async fn close(&self) -> Result<()> {
        let client = self.client.write().await.take().ok_or(Error::InvalidHandle)?;
        get_metrics().active_producers.dec();

        client.close().await.map_err(|e| {
            let err = match e {
                Error::Teardown(_) => e,
                other => Error::Teardown(other.to_string()),
            };
            error!("{}", err);
            err
        })?;

        info!("Closed Google Pub/Sub producer");
        Ok(())
    }

    async fn deliver(&self, event: &[u8]) -> std::result::Result<String, DeliveryError> {
        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or(DeliveryError::ProducerUnavailable)?;

        // Input that is not JSON carries no message.
        let envelope: Value =
            serde_json::from_slice(event).map_err(|_| DeliveryError::MessageNotFound)?;

        let message = match envelope.get("message") {
            Some(message) if !message.is_null() => message,
            _ => return Err(DeliveryError::MessageNotFound),
        };
        let data = serde_json::to_vec(message).map_err(DeliveryError::Serialization)?;
        validate_message_size(data.len(), PUBSUB_MAX_MESSAGE_SIZE)?;

        let topic = self.resolve_topic(envelope.get("topicId"))?;

        debug!("Publishing {} bytes to {}", data.len(), topic.name());
        client
            .publish(
                topic,
                PubsubMessage {
                    data,
                    ..Default::default()
                },
            )
            .await
            .map_err(DeliveryError::Publish)
    }

    fn resolve_topic(&self, topic_id: Option<&Value>) -> std::result::Result<&Topic, DeliveryError> {
        let topic_id = match topic_id {
            None | Some(Value::Null) => return Err(DeliveryError::TopicIdNotFound),
            Some(Value::String(topic_id)) => topic_id,
            Some(_) => return Err(DeliveryError::TopicIdNotString),
        };
        if topic_id.is_empty() {
            return Err(DeliveryError::EmptyTopicId);
        }

        self.topic_by_id(topic_id).ok_or(DeliveryError::TopicNotFound)
    }
}

#[async_trait]
impl Publisher for Producer {
    async fn publish(&self, event: &[u8]) -> Outcome {
        let started = Instant::now();

        let outcome = match self.deliver(event).await {
            Ok(server_id) => {
                debug!("Published message {}", server_id);
                Outcome::published(&server_id)
            }
            Err(err @ DeliveryError::Publish(_)) => {
                error!(code = err.code(), "{}", err);
                Outcome::from(err)
            }
            Err(err) => {
                warn!("Rejected event: {}", err);
                Outcome::from(err)
            }
        };

        get_metrics().record_publish(&outcome, started.elapsed());
        outcome
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        if self.client.get_mut().is_some() {
            get_metrics().active_producers.dec();
        }
    }
}
