use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status code {status} while fetching {url}")]
    Status { url: String, status: StatusCode },
    #[error("failed to read {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Downloads snapshots. One attempt per source, bounded by the timeout.
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            timeout,
        }
    }

    /// Fetch and parse one JSON document.
    ///
    /// Anything that is not an `http://` or `https://` URL is read as a local file.
    pub async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let body = if is_remote(url) {
            self.download(url).await?
        } else {
            debug!("Reading local snapshot {}", url);
            tokio::fs::read(url).await.map_err(|source| FetchError::Io {
                url: url.to_string(),
                source,
            })?
        };

        serde_json::from_slice(&body).map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }

    /// Like [`Fetcher::fetch`], but failures are logged and become `None`
    pub async fn load(&self, url: &str) -> Option<Value> {
        match self.fetch(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("Fetching {} (timeout {:?})", url, self.timeout);

        let request_error = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
