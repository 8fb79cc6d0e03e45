//! Integration tests for producer construction and teardown.

use std::sync::Arc;

use pubsub_destination::config::ClientSettings;
use pubsub_destination::pubsub::{InMemoryClient, Producer};
use pubsub_destination::Error;
use serde_json::{json, Value};

/// Helper to build a destination config
fn destination(credentials: &str, project_id: &str, map: Value) -> Value {
    json!({
        "credentials": credentials,
        "projectId": project_id,
        "eventToTopicMap": map,
    })
}

fn emulator() -> ClientSettings {
    ClientSettings::default().with_emulator_host("127.0.0.1:8085")
}

#[tokio::test]
async fn test_missing_credentials_fail_with_client_init() {
    let config = destination("", "my-project", json!([]));
    let result = Producer::with_settings(&config, &emulator()).await;
    assert!(matches!(result, Err(Error::ClientInit(_))));

    let result = Producer::with_client(&config, Arc::new(InMemoryClient::new("my-project")));
    assert!(matches!(result, Err(Error::ClientInit(_))));
}

#[tokio::test]
async fn test_missing_project_fails_with_client_init() {
    let config = json!({ "credentials": "{}", "eventToTopicMap": [] });
    let result = Producer::with_settings(&config, &emulator()).await;
    assert!(matches!(result, Err(Error::ClientInit(_))));
}

#[tokio::test]
async fn test_malformed_config_fails_with_config_error() {
    let config = json!({ "credentials": "{}", "projectId": "p", "eventToTopicMap": "orders" });
    let result = Producer::with_settings(&config, &emulator()).await;
    assert!(matches!(result, Err(Error::ConfigParse(_))));

    let result = Producer::with_settings(&json!("not an object"), &emulator()).await;
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[tokio::test]
async fn test_invalid_service_account_fails_with_client_init() {
    let config = destination("not a service account key", "my-project", json!([]));
    let result = Producer::with_settings(&config, &ClientSettings::default()).await;
    assert!(matches!(result, Err(Error::ClientInit(_))));
}

#[tokio::test]
async fn test_bindings_preserve_configuration_order() {
    let config = destination(
        "{}",
        "my-project",
        json!([
            { "from": "order_placed", "to": "orders" },
            { "from": "", "to": "catch-all" },
            { "from": "order_placed", "to": "orders-audit" },
            { "from": "refund", "to": "x" },
        ]),
    );
    let producer = Producer::with_settings(&config, &emulator()).await.unwrap();

    let bindings: Vec<(&str, &str)> = producer
        .bindings()
        .iter()
        .map(|b| (b.event(), b.topic().name()))
        .collect();
    assert_eq!(
        bindings,
        vec![
            ("order_placed", "projects/my-project/topics/orders"),
            ("", "projects/my-project/topics/catch-all"),
            ("order_placed", "projects/my-project/topics/orders-audit"),
            ("refund", "projects/my-project/topics/x"),
        ]
    );

    assert_eq!(
        producer.topic_for_event("order_placed").map(|t| t.name()),
        Some("projects/my-project/topics/orders")
    );
}

#[tokio::test]
async fn test_empty_map_builds_producer_without_bindings() {
    let config = json!({ "credentials": "{}", "projectId": "my-project" });
    let producer = Producer::with_settings(&config, &emulator()).await.unwrap();
    assert!(producer.bindings().is_empty());
    assert!(producer.is_open().await);
}

#[tokio::test]
async fn test_close_releases_client_once() {
    let client = InMemoryClient::new("my-project");
    let producer = Producer::with_client(
        &destination("{}", "my-project", json!([])),
        Arc::new(client.clone()),
    )
    .unwrap();

    producer.close().await.unwrap();
    assert!(client.is_closed());

    let err = producer.close().await.unwrap_err();
    assert!(matches!(err, Error::InvalidHandle));
    assert_eq!(err.to_string(), "error while closing producer");
}

#[tokio::test]
async fn test_close_failure_is_surfaced_and_not_retried() {
    let client = InMemoryClient::new("my-project");
    client.fail_close("connection reset").await;
    let producer = Producer::with_client(
        &destination("{}", "my-project", json!([])),
        Arc::new(client.clone()),
    )
    .unwrap();

    let err = producer.close().await.unwrap_err();
    assert!(matches!(err, Error::Teardown(ref msg) if msg == "connection reset"));
    assert!(!producer.is_open().await);
    assert!(matches!(producer.close().await, Err(Error::InvalidHandle)));
}

#[tokio::test]
async fn test_grpc_producer_close() {
    let config = destination("{}", "my-project", json!([{ "from": "a", "to": "orders" }]));
    let producer = Producer::with_settings(&config, &emulator()).await.unwrap();
    producer.close().await.unwrap();
    assert!(matches!(producer.close().await, Err(Error::InvalidHandle)));
}
