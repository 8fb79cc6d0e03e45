//! Resource names for Pub/Sub topics.

use std::fmt;

/// Path segment of a fully-qualified topic name that holds the topic ID.
pub const TOPIC_ID_SEGMENT: usize = 3;

/// A topic resource name: `projects/{project}/topics/{topic}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName {
    project: String,
    topic: String,
}

impl TopicName {
    /// Build a topic name from its parts.
    pub fn new(project: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            topic: topic.into(),
        }
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/topics/{}", self.project, self.topic)
    }
}

/// Return the path segment at `index` of a slash-separated resource name.
pub fn resource_segment(name: &str, index: usize) -> Option<&str> {
    name.split('/').nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_name_display() {
        let name = TopicName::new("my-project", "orders");
        assert_eq!(name.to_string(), "projects/my-project/topics/orders");
    }

    #[test]
    fn test_resource_segment() {
        let name = TopicName::new("p", "orders").to_string();
        assert_eq!(resource_segment(&name, TOPIC_ID_SEGMENT), Some("orders"));
        assert_eq!(resource_segment(&name, 1), Some("p"));
        assert_eq!(resource_segment("projects/p", TOPIC_ID_SEGMENT), None);
    }
}
