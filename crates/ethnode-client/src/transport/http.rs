//! HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::Transport;
use crate::config::ConnectionKind;
use crate::error::TransportError;

/// POSTs each request to the node's HTTP endpoint
///
/// Connections are pooled by the underlying client, so concurrent sends
/// are fine.
pub struct HttpTransport {
    client: Client,
    url: Option<Url>,
    timeout: Duration,
}

impl HttpTransport {
    /// Create an unbound transport
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: None,
            timeout,
        })
    }

    /// Create a transport bound to `url`
    pub fn with_address(url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut transport = Self::new(timeout)?;
        transport.configure(url)?;
        Ok(transport)
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            warn!("HTTP request timed out after {:?}", self.timeout);
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Http
    }

    fn address(&self) -> Option<&str> {
        self.url.as_ref().map(Url::as_str)
    }

    fn configure(&mut self, address: &str) -> Result<(), TransportError> {
        let url: Url = address.parse().map_err(|e: url::ParseError| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidAddress {
                address: address.to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        self.url = Some(url);
        Ok(())
    }

    async fn send(&self, payload: &str, id: u64) -> Result<String, TransportError> {
        let url = self.url.as_ref().ok_or(TransportError::NotConfigured)?;

        debug!("POST request {} to {}", id, url);

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_owned())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            warn!("Request {} failed with HTTP status {}", id, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
