// Publish command implementation
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::commands::read_destination_config;
use crate::cli::output::{print_json_line, print_success, print_warning};
use crate::config::ClientSettings;
use crate::pubsub::{Producer, Publisher};

/// Counts of published and failed envelopes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishSummary {
    /// Envelopes acknowledged by the service
    pub succeeded: usize,
    /// Envelopes that produced a failure outcome
    pub failed: usize,
}

/// Execute the publish command - publishes every envelope read from the input
pub async fn execute(config: &Path, input: Option<&Path>, emulator_host: Option<String>) -> Result<()> {
    let destination = read_destination_config(config).await?;

    let mut settings = ClientSettings::from_env();
    if let Some(host) = emulator_host {
        settings = settings.with_emulator_host(host);
    }

    let producer = Producer::with_settings(&destination, &settings)
        .await
        .context("Failed to create producer")?;
    info!("Producer ready with {} topic bindings", producer.bindings().len());

    let summary = match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            publish_lines(&producer, BufReader::new(file)).await
        }
        None => publish_lines(&producer, BufReader::new(tokio::io::stdin())).await,
    };

    // Close even when reading the input failed.
    let closed = producer.close().await;
    let summary = summary?;
    closed.context("Failed to close producer")?;

    if summary.failed > 0 {
        print_warning(&format!(
            "{} published, {} failed",
            summary.succeeded, summary.failed
        ));
        anyhow::bail!("{} events could not be published", summary.failed);
    }

    print_success(&format!("{} events published", summary.succeeded));
    Ok(())
}

/// Publish one envelope per non-empty line and print each outcome as JSON
pub async fn publish_lines<R>(publisher: &dyn Publisher, reader: R) -> Result<PublishSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = PublishSummary::default();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = publisher.publish(line.as_bytes()).await;
        if outcome.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
        print_json_line(&outcome)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubsub::InMemoryClient;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_publish_lines_counts_outcomes() {
        let client = InMemoryClient::new("my-project");
        let producer = Producer::with_client(
            &json!({
                "credentials": "{}",
                "projectId": "my-project",
                "eventToTopicMap": [{ "from": "order", "to": "orders" }]
            }),
            Arc::new(client.clone()),
        )
        .unwrap();

        let input = concat!(
            "{\"message\":{\"id\":1},\"topicId\":\"orders\"}\n",
            "\n",
            "{\"message\":{\"id\":2}}\n",
            "   {\"message\":{\"id\":3},\"topicId\":\"orders\"}   \n",
        );

        let summary = publish_lines(&producer, input.as_bytes()).await.unwrap();
        assert_eq!(summary, PublishSummary { succeeded: 2, failed: 1 });
        assert_eq!(client.published().await.len(), 2);
    }
}
