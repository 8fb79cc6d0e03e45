//! Google Cloud Pub/Sub destination.
//!
//! This module contains:
//! - The [`Producer`] lifecycle and the publish path
//! - The [`PubSubClient`] seam with gRPC and in-memory implementations
//! - The mapping of service errors to outcome codes

/// Protocol Buffer definitions for the Pub/Sub Publisher service.
#[allow(clippy::all)]
pub mod proto;

pub mod classify;
pub mod client;
pub mod grpc;
pub mod memory;
pub mod outcome;
pub mod producer;
pub mod types;

pub use classify::{classify, status_code};
pub use client::{PubSubClient, Topic};
pub use grpc::GrpcClient;
pub use memory::{InMemoryClient, PublishedMessage};
pub use outcome::{DeliveryError, Outcome, OutcomeStatus};
pub use producer::{produce, Producer, Publisher, TopicBinding};
pub use types::TopicName;
