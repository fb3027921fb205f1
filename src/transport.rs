//! Network exchange with the positioning service.

use std::{future::Future, time::Duration};

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::{amap::request::RequestPayload, provider::ProviderError};

/// Sends one request and returns the raw response body.
///
/// Implementations must report every connection, TLS, timeout and non-2xx
/// failure as [`ProviderError::Transport`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        payload: &RequestPayload,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// HTTPS transport posting the payload as JSON.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, payload: &RequestPayload) -> Result<Vec<u8>, ProviderError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ProviderError::Transport(format!("failed to encode request: {e}")))?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .and_then(|x| x.error_for_status())
            .map_err(|e| {
                warn!(url = %self.url, "request failed: {e}");
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        debug!(%status, len = body.len(), "received response");

        Ok(body.to_vec())
    }
}
