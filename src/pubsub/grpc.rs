//! gRPC messaging client for Google Cloud Pub/Sub.
//!
//! Talks to the `google.pubsub.v1.Publisher` service over a lazily connected
//! tonic channel. Against the real service the channel uses TLS and every call
//! carries an OAuth bearer token minted from the service account credentials;
//! against an emulator the channel is plaintext and unauthenticated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};
use tracing::{debug, info};

use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::pubsub::client::{PubSubClient, Topic};
use crate::pubsub::proto::publisher_client::PublisherClient;
use crate::pubsub::proto::{PublishRequest, PubsubMessage};
use crate::types::PUBSUB_MAX_MESSAGE_SIZE;

/// Room for the request envelope around a maximum-size message.
const MAX_REQUEST_SIZE: usize = PUBSUB_MAX_MESSAGE_SIZE + 64 * 1024;

/// Pub/Sub client backed by tonic.
pub struct GrpcClient {
    project_id: String,
    publisher: PublisherClient<Channel>,
    auth: Option<Arc<dyn TokenProvider>>,
    scopes: Vec<String>,
    closed: AtomicBool,
}

impl GrpcClient {
    /// Create a client for `project_id` authenticated with a service account key.
    ///
    /// The channel connects on first use, so this performs no network I/O. It must
    /// be called from within a Tokio runtime.
    pub fn connect(project_id: &str, credentials: &str, settings: &ClientSettings) -> Result<Self> {
        let (channel, auth) = match settings.emulator_host.as_deref() {
            Some(host) => {
                info!("Using Pub/Sub emulator at {}", host);
                let endpoint = Endpoint::from_shared(format!("http://{}", host))
                    .map_err(|e| Error::ClientInit(format!("invalid emulator host {}: {}", host, e)))?;
                (endpoint.connect_lazy(), None)
            }
            None => {
                let account = CustomServiceAccount::from_json(credentials)
                    .map_err(|e| Error::ClientInit(format!("invalid credentials: {}", e)))?;
                let endpoint = Endpoint::from_shared(settings.endpoint.clone())
                    .map_err(|e| {
                        Error::ClientInit(format!("invalid endpoint {}: {}", settings.endpoint, e))
                    })?
                    .tls_config(ClientTlsConfig::new().with_webpki_roots())
                    .map_err(|e| Error::ClientInit(format!("TLS configuration failed: {}", e)))?;
                let auth: Arc<dyn TokenProvider> = Arc::new(account);
                (endpoint.connect_lazy(), Some(auth))
            }
        };

        let publisher = PublisherClient::new(channel)
            .max_encoding_message_size(MAX_REQUEST_SIZE)
            .max_decoding_message_size(MAX_REQUEST_SIZE);

        info!("Created Pub/Sub client for project {}", project_id);

        Ok(Self {
            project_id: project_id.to_string(),
            publisher,
            auth,
            scopes: settings.scopes.clone(),
            closed: AtomicBool::new(false),
        })
    }

    /// Attach an access token to the request when talking to the real service.
    async fn authorize<T>(&self, request: &mut Request<T>) -> std::result::Result<(), Status> {
        let Some(auth) = &self.auth else {
            return Ok(());
        };

        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        let token = auth
            .token(&scopes)
            .await
            .map_err(|e| Status::unauthenticated(format!("failed to obtain access token: {}", e)))?;
        let value: MetadataValue<Ascii> = format!("Bearer {}", token.as_str())
            .parse()
            .map_err(|_| Status::unauthenticated("access token is not a valid header value"))?;
        request.metadata_mut().insert("authorization", value);
        Ok(())
    }
}

#[async_trait]
impl PubSubClient for GrpcClient {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn publish(&self, topic: &Topic, message: PubsubMessage) -> std::result::Result<String, Status> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Status::failed_precondition("Pub/Sub client is closed"));
        }

        let mut request = Request::new(PublishRequest {
            topic: topic.name().to_string(),
            messages: vec![message],
        });
        self.authorize(&mut request).await?;

        debug!("Publish: 1 message to {}", topic.name());
        let response = self.publisher.clone().publish(request).await?;

        response
            .into_inner()
            .message_ids
            .into_iter()
            .next()
            .ok_or_else(|| Status::internal("publish response did not contain a message ID"))
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(Error::Teardown("client already closed".to_string()));
        }
        info!("Closed Pub/Sub client for project {}", self.project_id);
        Ok(())
    }
}
