//! Validation functions for topic IDs and message payloads.

use crate::error::ValidationError;

/// Pub/Sub maximum message size (10 MB).
pub const PUBSUB_MAX_MESSAGE_SIZE: usize = 10_485_760;

/// Pub/Sub topic ID validation (3-255 chars, must start with letter).
///
/// Topic IDs may contain letters, numbers, hyphens, underscores, periods,
/// tildes, plus and percent signs, and must not start with `goog`.
pub fn validate_topic_id(topic_id: &str) -> Result<(), ValidationError> {
    if topic_id.len() < 3 || topic_id.len() > 255 {
        return Err(ValidationError::InvalidTopicId(format!(
            "Topic ID must be 3-255 characters, got {}",
            topic_id.len()
        )));
    }

    if let Some(first) = topic_id.chars().next() {
        if !first.is_ascii_alphabetic() {
            return Err(ValidationError::InvalidTopicId(
                "Topic ID must start with a letter".to_string(),
            ));
        }
    }

    if topic_id.to_ascii_lowercase().starts_with("goog") {
        return Err(ValidationError::InvalidTopicId(
            "Topic ID must not start with \"goog\"".to_string(),
        ));
    }

    for ch in topic_id.chars() {
        if !matches!(ch, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' | '+' | '%') {
            return Err(ValidationError::InvalidTopicId(format!(
                "Topic ID contains invalid character: '{}'",
                ch
            )));
        }
    }

    Ok(())
}

/// Validate message size against the given limit.
pub fn validate_message_size(size: usize, max_size: usize) -> Result<(), ValidationError> {
    if size > max_size {
        return Err(ValidationError::MessageTooLarge { size, max: max_size });
    }
    Ok(())
}
