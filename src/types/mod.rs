//! Common data types and validation helpers.

pub mod validation;

pub use validation::{validate_message_size, validate_topic_id, PUBSUB_MAX_MESSAGE_SIZE};
