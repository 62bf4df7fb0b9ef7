//! Posts fetched over HTTP

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use super::{FetchError, PostSource};
use crate::helpers::join_url;

/// Reads posts from a web server, with caching disabled on every request
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source rooted at `base_url`. Without a timeout a stalled
    /// request waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| FetchError::Request {
            path: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// The URL a post path is requested from
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl PostSource for HttpSource {
    async fn read(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);
        let request_error = |source| FetchError::Request {
            path: path.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}
