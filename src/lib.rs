//! # pubsub-destination
//!
//! A destination adapter that publishes JSON events to Google Cloud Pub/Sub.
//!
//! The host pipeline builds a [`Producer`](pubsub::Producer) once per
//! destination configuration and hands it every event envelope. Each publish
//! resolves the topic named by the envelope's `topicId`, publishes the
//! envelope's `message`, and reports an [`Outcome`](pubsub::Outcome): an
//! HTTP-like code, a `Success`/`Failure` status and a message.
//!
//! ```no_run
//! use pubsub_destination::pubsub::{Producer, Publisher};
//! use serde_json::json;
//!
//! # async fn run() -> pubsub_destination::Result<()> {
//! let producer = Producer::new(&json!({
//!     "credentials": std::env::var("GOOGLE_CREDENTIALS_JSON").unwrap_or_default(),
//!     "projectId": "my-project",
//!     "eventToTopicMap": [{ "from": "order_placed", "to": "orders" }]
//! }))
//! .await?;
//!
//! let outcome = producer
//!     .publish(br#"{"message": {"id": 1}, "topicId": "orders"}"#)
//!     .await;
//! println!("{} {} {}", outcome.code, outcome.status, outcome.message);
//!
//! producer.close().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pubsub;
pub mod types;

pub use error::{Error, Result};
