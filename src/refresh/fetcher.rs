//! Remote document retrieval.

use std::future::Future;

use crate::config::SourceConfig;
use crate::refresh::error::RefreshError;

/// Retrieves the raw bytes of the remote configuration document.
///
/// Implementations fail with [`RefreshError::Transport`] when the endpoint
/// cannot be reached and [`RefreshError::Read`] when the body cannot be
/// drained. They never interpret the bytes.
pub trait ConfigFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, RefreshError>> + Send;

    /// Human-readable location, for logs.
    fn source(&self) -> &str;
}

/// Plain unauthenticated GET against a single fixed URL.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, RefreshError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| RefreshError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.url.clone()))
    }

    /// Use a preconfigured client, e.g. one that bypasses system proxies.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ConfigFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, RefreshError> {
        // The response is owned by this call and dropped on every return path,
        // which releases the connection.
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Transport(format!("unexpected status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))?;

        tracing::debug!(url = %self.url, bytes = body.len(), "Fetched remote config");
        Ok(body.to_vec())
    }

    fn source(&self) -> &str {
        &self.url
    }
}
