//! Alert transports.
//!
//! [`SimulatedTransport`] acknowledges after a fixed latency.
//! [`WebhookTransport`] POSTs the JSON-encoded [`AlertPayload`] to an
//! external URL. Neither retries; a failed delivery is reported once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use heatguard_core::alert::AlertPayload;

use crate::config::TransportConfig;

/// HTTP request timeout for a single webhook delivery.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Delivers an alert payload to the caregiver's channel.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, payload: &AlertPayload) -> Result<(), TransportError>;
}

/// Build the transport selected by configuration.
pub fn from_config(config: &TransportConfig) -> Result<Arc<dyn Transport>, TransportError> {
    match config {
        TransportConfig::Simulated { delay } => Ok(Arc::new(SimulatedTransport::new(*delay))),
        TransportConfig::Webhook { url } => Ok(Arc::new(WebhookTransport::new(url.clone())?)),
    }
}

// ---------------------------------------------------------------------------
// SimulatedTransport
// ---------------------------------------------------------------------------

/// Stand-in for a real paging service: waits, then acknowledges.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn deliver(&self, payload: &AlertPayload) -> Result<(), TransportError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            alert_id = %payload.alert_id,
            recipient = %payload.recipient,
            message = %payload.message,
            "[Emergency alert sent]",
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WebhookTransport
// ---------------------------------------------------------------------------

pub struct WebhookTransport {
    client: reqwest::Client,
    url: String,
}

impl WebhookTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn deliver(&self, payload: &AlertPayload) -> Result<(), TransportError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(url = %self.url, alert_id = %payload.alert_id, "Webhook accepted alert");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
