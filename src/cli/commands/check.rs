// Check-config command implementation
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::commands::read_destination_config;
use crate::cli::output::{print_list, print_success, print_warning, OutputFormat};
use crate::config::DestinationConfig;
use crate::pubsub::TopicName;
use crate::types::validate_topic_id;

/// One row of the binding listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct BindingRow {
    /// Event name, `-` when empty
    pub event: String,
    /// Fully-qualified topic name
    pub topic: String,
}

/// Execute the check-config command - validates a destination configuration
pub async fn execute(config: &Path, format: &str) -> Result<()> {
    let value = read_destination_config(config).await?;
    let destination = DestinationConfig::from_value(&value)?;
    destination
        .validate()
        .context("Destination config cannot create a Pub/Sub client")?;

    for mapping in &destination.event_to_topic_map {
        if let Err(e) = validate_topic_id(&mapping.to) {
            print_warning(&format!("topic {:?}: {}", mapping.to, e));
        }
    }

    print_list(&binding_rows(&destination), OutputFormat::parse(format))?;
    print_success(&format!(
        "Destination config for project {} is valid",
        destination.project_id
    ));
    Ok(())
}

/// Rows describing the bindings a producer would create, in configuration order
pub fn binding_rows(config: &DestinationConfig) -> Vec<BindingRow> {
    config
        .event_to_topic_map
        .iter()
        .map(|mapping| BindingRow {
            event: if mapping.from.is_empty() {
                "-".to_string()
            } else {
                mapping.from.clone()
            },
            topic: TopicName::new(config.project_id.as_str(), mapping.to.as_str()).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopicMapping;

    #[test]
    fn test_binding_rows_preserve_order() {
        let config = DestinationConfig {
            credentials: "{}".into(),
            project_id: "p".into(),
            event_to_topic_map: vec![
                TopicMapping { from: "b".into(), to: "second".into() },
                TopicMapping { from: String::new(), to: "first".into() },
            ],
        };

        assert_eq!(
            binding_rows(&config),
            vec![
                BindingRow { event: "b".into(), topic: "projects/p/topics/second".into() },
                BindingRow { event: "-".into(), topic: "projects/p/topics/first".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_missing_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dest.json");
        tokio::fs::write(&path, br#"{"projectId":"p","eventToTopicMap":[]}"#)
            .await
            .unwrap();

        assert!(execute(&path, "json").await.is_err());
    }

    #[tokio::test]
    async fn test_execute_accepts_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dest.json");
        tokio::fs::write(
            &path,
            br#"{"credentials":"{}","projectId":"p","eventToTopicMap":[{"from":"a","to":"orders"}]}"#,
        )
        .await
        .unwrap();

        execute(&path, "json").await.unwrap();
    }
}
