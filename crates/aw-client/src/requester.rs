//! The request executor.

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::Request;
use crate::response::RawResponse;
use crate::transport::{PinnedTransport, TransportProvider};
use crate::REQUEST_TIMESTAMP_HEADER;

/// Executes [`Request`]s against the Authware API.
///
/// Cloning is cheap; clones share the same configuration and transport.
#[derive(Debug, Clone)]
pub struct Requester {
    config: Arc<ClientConfig>,
    transport: Arc<dyn TransportProvider>,
}

impl Requester {
    /// Create a requester using the default [`PinnedTransport`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = PinnedTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a requester with a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn TransportProvider>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a relative path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send `request` and decode a successful body as `T`.
    ///
    /// Non-success statuses are classified by [`RawResponse::into_result`].
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        self.execute(request).await?.into_result()
    }

    /// Send `request` and return the buffered response without classifying it.
    pub async fn execute(&self, request: Request) -> Result<RawResponse> {
        let url = self.url(&request.path)?;
        let client = self.transport.client(request.credential.as_ref())?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut builder = client
            .request(request.method.to_reqwest(), url.clone())
            .header(REQUEST_TIMESTAMP_HEADER, timestamp);

        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_vec(&body)?);
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %url, "Sending request");
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, len = body.len(), "Response received");
            } else {
                info!(status, len = body.len(), "Non-success response");
            }
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
