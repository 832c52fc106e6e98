use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::app_config::ServiceConfig;
use crate::errors::TransportError;

use super::{ProcessingService, ServiceReply};

/// Upper bound for a health probe, independent of the request timeout
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the processing service
#[derive(Debug, Clone)]
pub struct HttpService {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:4664`
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    health_timeout: Duration,
}

impl HttpService {
    /// Create a client for `base_url`.
    ///
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut builder = Client::builder()
            // Keep connections alive between submits
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client, health_timeout: HEALTH_CHECK_TIMEOUT })
    }

    /// Create a client from the `service` section of the configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, TransportError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    /// Override the health probe bound
    pub fn with_health_check_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a reqwest failure onto the transport taxonomy
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

#[async_trait]
impl ProcessingService for HttpService {
    async fn post_json(&self, path: &str, body: &Value) -> Result<ServiceReply, TransportError> {
        let url = self.url_for(path);
        debug!("POST {} {}", url, body);

        let response = self.client.post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let response_text = response.text().await.map_err(classify)?;

        let parsed: Value = serde_json::from_str(&response_text).map_err(|e| {
            // Log the raw response for debugging
            error!("Non-JSON reply from {} (HTTP {}): {}. Raw response (first 200 chars): {}",
                   url, status.as_u16(), e, response_text.chars().take(200).collect::<String>());
            TransportError::Parse(e.to_string())
        })?;

        debug!("Reply from {} (HTTP {}): {}", url, status.as_u16(), parsed);
        Ok(ServiceReply::from_json(status.as_u16(), &parsed))
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        // Any HTTP answer, even a 404, means the service is listening
        self.client.get(&self.base_url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map(|_| ())
            .map_err(classify)
    }
}
