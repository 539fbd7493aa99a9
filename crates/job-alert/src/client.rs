//! HTTP client for the configuration service.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::form::ConfigPayload;
use crate::profiles::{ConfigSnapshot, ConfigUpdateResponse, HealthStatus, ProfileList, UserProfile};

/// Message used when the service rejects a request without saying why.
pub const FALLBACK_ERROR: &str = "failed to update configuration";

/// The one call the form controller makes. Kept as a trait so the controller can be driven
/// without a live service.
#[async_trait]
pub trait ConfigClient: Send + Sync {
    async fn submit_config(
        &self,
        payload: &ConfigPayload,
    ) -> Result<ConfigUpdateResponse, ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// No response was obtained.
    #[error("request failed: {0}")]
    Transport(String),
    /// A success status arrived with a body that could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpConfigClient {
    client: Client,
    base_url: Url,
}

impl HttpConfigClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint(&["health"])?;
        self.get(url).await
    }

    /// `GET /config`
    pub async fn fetch_config(&self) -> Result<ConfigSnapshot, ClientError> {
        let url = self.endpoint(&["config"])?;
        self.get(url).await
    }

    /// `GET /profiles`
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, ClientError> {
        let url = self.endpoint(&["profiles"])?;
        let list: ProfileList = self.get(url).await?;
        Ok(list.profiles)
    }

    /// `GET /profiles/{email}`
    pub async fn fetch_profile(&self, email: &str) -> Result<UserProfile, ClientError> {
        let url = self.endpoint(&["profiles", email])?;
        self.get(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(%url, "requesting config service");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        decode(response).await
    }
}

#[async_trait]
impl ConfigClient for HttpConfigClient {
    async fn submit_config(
        &self,
        payload: &ConfigPayload,
    ) -> Result<ConfigUpdateResponse, ClientError> {
        let url = self.endpoint(&["config"])?;
        debug!(%url, receivers = payload.receiver_emails.len(), "posting configuration");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ClientError::Transport(err.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
}
