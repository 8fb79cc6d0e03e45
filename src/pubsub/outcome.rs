//! Publish outcomes reported to the host pipeline.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tonic::Status;

use crate::error::ValidationError;
use crate::pubsub::classify;

/// Prefix of every failure message.
pub const FAILURE_PREFIX: &str = "[GooglePubSub] error :: ";

/// Coarse result of a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutcomeStatus {
    /// The message was acknowledged by the service.
    Success,
    /// The message was not published.
    Failure,
}

impl OutcomeStatus {
    /// Label as understood by the host pipeline.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "Success",
            OutcomeStatus::Failure => "Failure",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one publish: numeric code, status and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// HTTP-like status code.
    pub code: u16,
    /// Success or failure.
    pub status: OutcomeStatus,
    /// Human-readable detail.
    pub message: String,
}

impl Outcome {
    /// Successful publish acknowledged with `server_id`.
    pub fn published(server_id: &str) -> Self {
        Self {
            code: 200,
            status: OutcomeStatus::Success,
            message: format!("Message publish with serverID{}", server_id),
        }
    }

    /// Failed publish.
    pub fn failure(code: u16, detail: impl fmt::Display) -> Self {
        Self {
            code,
            status: OutcomeStatus::Failure,
            message: format!("{}{}", FAILURE_PREFIX, detail),
        }
    }

    /// Whether the message was published.
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Split into the `(code, status, message)` triple.
    pub fn into_parts(self) -> (u16, &'static str, String) {
        (self.code, self.status.as_str(), self.message)
    }
}

/// Reasons a single event could not be published.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// No usable producer backs the call.
    #[error("could not create producer")]
    ProducerUnavailable,

    /// The envelope has no `message`, or it is null or not JSON at all.
    #[error("message from payload not found")]
    MessageNotFound,

    /// The `message` value could not be serialized.
    #[error("{0}")]
    Serialization(#[source] serde_json::Error),

    /// The serialized payload violates a service limit.
    #[error("{0}")]
    Payload(#[from] ValidationError),

    /// `topicId` is not a string.
    #[error("could not parse topic id to string")]
    TopicIdNotString,

    /// `topicId` is an empty string.
    #[error("empty topic id string")]
    EmptyTopicId,

    /// No configured topic carries the requested ID.
    #[error("Topic not found in project")]
    TopicNotFound,

    /// The envelope has no `topicId`.
    #[error("Topic Id not found")]
    TopicIdNotFound,

    /// The service rejected or failed the publish.
    #[error("Failed to publish:{:?}: {}", .0.code(), .0.message())]
    Publish(Status),
}

impl DeliveryError {
    /// Outcome code for this failure.
    pub fn code(&self) -> u16 {
        match self {
            DeliveryError::Publish(status) => classify::classify(status),
            _ => 400,
        }
    }
}

impl From<DeliveryError> for Outcome {
    fn from(err: DeliveryError) -> Self {
        Outcome::failure(err.code(), &err)
    }
}
