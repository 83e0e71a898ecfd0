//! HTTP client for issuing probes.

use async_trait::async_trait;
use frontier_estimate::Probe;
use frontier_types::{Endpoint, ProbeOutcome};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::classify_response;
use crate::url::probe_url;

/// Configuration for the probe client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout. An expired request surfaces as a transport error.
    pub timeout: Duration,
    /// Maximum retry attempts for 5xx responses and connection failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0, // Fail fast: any failed probe ends the estimation
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("frontier/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

impl ClientConfig {
    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Errors raised by the HTTP layer before a response can be classified.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request failed before a response arrived.
    #[error("Request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("Failed to read response from {url}: {source}")]
    Body {
        /// The requested URL.
        url: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },
}

/// A fully read response, ready for classification.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// HTTP client that turns listing queries into probe outcomes.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    config: ClientConfig,
}

impl ProbeClient {
    /// Creates a new probe client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            // Connection timeout (separate from request timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Binds this client to an endpoint, producing a [`Probe`].
    #[must_use]
    pub fn bind(&self, endpoint: Endpoint) -> EndpointProbe {
        EndpointProbe {
            client: self.clone(),
            endpoint,
        }
    }

    /// Asks `endpoint` whether any item exists after `test_id`.
    ///
    /// Never fails: every error is folded into the returned outcome.
    pub async fn query(&self, endpoint: &Endpoint, test_id: u64) -> ProbeOutcome {
        let url = probe_url(endpoint, test_id);
        let mut attempts = 0;

        loop {
            match self.fetch(&url).await {
                Ok(response) => {
                    debug!(%url, status = response.status.as_u16(), "probe response");

                    if response.status.is_server_error() && attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = self.calculate_backoff_delay(attempts);
                        warn!(%url, status = response.status.as_u16(), attempt = attempts, ?delay, "retrying probe");
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return classify_response(response.status, &response.headers, &response.body);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempt = attempts, ?delay, "retrying probe");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return ProbeOutcome::TransportError(e.to_string()),
            }
        }
    }

    /// Sends one GET and reads the whole body.
    async fn fetch(&self, url: &str) -> Result<RawResponse, ClientError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ClientError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|source| ClientError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        // Cap at max delay
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Add jitter (±25%)
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            // Deterministic jitter based on attempt number
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    ///
    /// Only failures before a response arrived qualify; throttling responses
    /// are never retried here.
    fn is_retryable_error(error: &ClientError) -> bool {
        match error {
            ClientError::Request { source, .. } => {
                !source.is_builder() && (source.is_timeout() || source.is_connect())
            }
            ClientError::Build(_) | ClientError::Body { .. } => false,
        }
    }
}

/// A [`ProbeClient`] bound to one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointProbe {
    client: ProbeClient,
    endpoint: Endpoint,
}

impl EndpointProbe {
    /// Returns the endpoint this probe queries.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl Probe for EndpointProbe {
    async fn probe(&self, test_id: u64) -> ProbeOutcome {
        self.client.query(&self.endpoint, test_id).await
    }
}
