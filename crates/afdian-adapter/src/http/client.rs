/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::http::{AfdianError, Result};
use crate::types::{ApiEnvelope, EC_OK};

/// Base URL for the Afdian API
const API_BASE_URL: &str = "https://afdian.com";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Outcome of one page request, before any accumulation.
///
/// Remote failures are data here, not errors: pagination stops on them
/// without discarding previously gathered pages.
#[derive(Debug)]
pub(crate) enum PageStatus<T> {
    Ok(T),
    HttpError { status: u16 },
    ApiError { code: i64, message: String },
}

/// Main HTTP client for the Afdian API
#[derive(Debug)]
pub struct AfdianClient {
    http_client: Client,
    base_url: Url,
}

impl AfdianClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL)
    }

    /// Create a new client against an explicit base URL (used by tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build request builder for an API endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode the `{ec, em, data}` envelope.
    ///
    /// Both transport status and envelope code are surfaced as
    /// [`PageStatus`] values; only network failures and shape mismatches
    /// become errors.
    pub(crate) async fn send_page<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<PageStatus<T>> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(PageStatus::HttpError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        if envelope.ec != EC_OK {
            return Ok(PageStatus::ApiError {
                code: envelope.ec,
                message: envelope.em,
            });
        }

        envelope.data.map(PageStatus::Ok).ok_or_else(|| {
            AfdianError::InvalidResponse("success envelope carried no data".to_string())
        })
    }

    /// Send a request and decode the envelope without a status check.
    ///
    /// The login flow reads `data` regardless of the remote code; a
    /// missing token is signaled by the payload, not the envelope.
    pub(crate) async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiEnvelope<T>> {
        let response = builder.send().await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
