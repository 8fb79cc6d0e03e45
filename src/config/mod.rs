//! Configuration for the Pub/Sub destination.
//!
//! [`DestinationConfig`] is supplied by the host pipeline as a JSON object and
//! carries the secrets and the event-to-topic mapping. [`ClientSettings`] holds
//! the non-secret knobs of the messaging client and [`LoggingConfig`] drives the
//! command-line tool's subscriber.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Environment variable pointing the client at a Pub/Sub emulator.
pub const PUBSUB_EMULATOR_HOST_ENV: &str = "PUBSUB_EMULATOR_HOST";

/// Default Pub/Sub gRPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pubsub.googleapis.com";

/// OAuth scope required for publishing.
pub const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Destination configuration as stored by the host pipeline.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationConfig {
    /// Service account key JSON.
    #[serde(default)]
    pub credentials: String,
    /// GCP project that owns the topics.
    #[serde(default)]
    pub project_id: String,
    /// Ordered event-name to topic-name pairs.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_to_topic_map: Vec<TopicMapping>,
}

/// One entry of the event-to-topic map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMapping {
    /// Event name, may be empty.
    #[serde(default)]
    pub from: String,
    /// Topic ID within the configured project.
    #[serde(default)]
    pub to: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<TopicMapping>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TopicMapping>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DestinationConfig {
    /// Deserialize the host-supplied configuration value.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(Error::ConfigParse)
    }

    /// Check that a messaging client can be built from this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_empty() || self.project_id.is_empty() {
            return Err(Error::ClientInit(
                "credentials and projectId are required to create a Pub/Sub client".to_string(),
            ));
        }
        Ok(())
    }
}

// Credentials never reach the logs.
impl fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationConfig")
            .field("credentials", &if self.credentials.is_empty() { "" } else { "<redacted>" })
            .field("project_id", &self.project_id)
            .field("event_to_topic_map", &self.event_to_topic_map)
            .finish()
    }
}

/// Messaging client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// gRPC endpoint of the Pub/Sub service.
    pub endpoint: String,
    /// Emulator `host:port`; when set the client connects in plaintext without auth.
    pub emulator_host: Option<String>,
    /// OAuth scopes requested for the access token.
    pub scopes: Vec<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            emulator_host: None,
            scopes: vec![PUBSUB_SCOPE.to_string()],
        }
    }
}

impl ClientSettings {
    /// Default settings, honoring `PUBSUB_EMULATOR_HOST` when present.
    pub fn from_env() -> Self {
        Self {
            emulator_host: std::env::var(PUBSUB_EMULATOR_HOST_ENV)
                .ok()
                .filter(|host| !host.is_empty()),
            ..Self::default()
        }
    }

    /// Point the client at an emulator.
    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive.
    pub level: String,
    /// Log format (text or json).
    pub format: LogFormat,
}

/// Log format enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain text format.
    Text,
    /// JSON format.
    Json,
}
