//! GlobalWeather SOAP transport

use async_trait::async_trait;
use reqwest::header;

use crate::soap::{CONTENT_TYPE, ENDPOINT, FETCH_FAILED, SOAP_ACTION};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "An error occurred";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service answered with a non-success status. The body is dropped.
    #[error("Failed to fetch weather data")]
    Status(u16),
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
}

impl LookupError {
    fn transport(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }

    /// Text for the error block.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Status(_) => FETCH_FAILED.to_string(),
            LookupError::Transport(msg) if msg.trim().is_empty() => FALLBACK_ERROR.to_string(),
            LookupError::Transport(msg) => msg.clone(),
        }
    }
}

/// Something that can carry one SOAP envelope to the weather service and
/// hand back the raw response text.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn post_envelope(&self, envelope: String) -> Result<String, LookupError>;
}

/// reqwest-backed transport. No retries, no timeout beyond reqwest's defaults.
pub struct SoapClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SoapClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Use a preconfigured reqwest client (proxy, TLS or timeout settings).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new(ENDPOINT)
    }
}

#[async_trait]
impl WeatherService for SoapClient {
    async fn post_envelope(&self, envelope: String) -> Result<String, LookupError> {
        log::debug!("POST {} ({} bytes)", self.endpoint, envelope.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header("SOAPAction", SOAP_ACTION)
            .body(envelope)
            .send()
            .await
            .map_err(LookupError::transport)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered {}", self.endpoint, status);
            return Err(LookupError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(LookupError::transport)?;
        log::info!("{} answered {} ({} bytes)", self.endpoint, status, text.len());
        Ok(text)
    }
}
