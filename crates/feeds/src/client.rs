//! HTTP transport behind a small trait so adapters can be exercised without
//! the network.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Default per-request timeout. Expiry is reported as [`FetchError::Timeout`].
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("frontmap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream HTTP {0}")]
    Status(u16),
}

/// Fetches a URL and returns the raw response body.
///
/// Implementations must treat any non-success status as an error.
pub trait FeedClient: Send + Sync {
    fn get_bytes(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// `reqwest` implementation with connection pooling and a request timeout.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { http, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl FeedClient for HttpFeedClient {
    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;
        tracing::debug!(url, status = status.as_u16(), bytes = bytes.len(), "feed fetched");
        Ok(bytes.to_vec())
    }
}
