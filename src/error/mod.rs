//! Error types for the Pub/Sub destination.

use thiserror::Error;

/// Result type for producer lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for producer construction and teardown.
///
/// Per-event failures never surface through this type; they are folded into an
/// [`Outcome`](crate::pubsub::Outcome) by the publisher.
#[derive(Error, Debug)]
pub enum Error {
    /// Destination configuration could not be deserialized.
    #[error("Configuration error: error while unmarshalling destination config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// The messaging client could not be constructed.
    #[error("Client initialization error: {0}")]
    ClientInit(String),

    /// The handle does not own a messaging client (already closed).
    #[error("error while closing producer")]
    InvalidHandle,

    /// Releasing the messaging client failed.
    #[error("error in closing Google Pub/Sub producer: {0}")]
    Teardown(String),
}

/// Validation error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid topic ID.
    #[error("Invalid topic ID: {0}")]
    InvalidTopicId(String),

    /// Message too large.
    #[error("Message too large: {size} bytes (max: {max} bytes)")]
    MessageTooLarge {
        /// Actual message size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
}
