//! Stylesheet fetching.
//!
//! The picker only needs "give me the CSS body at this address". Anything
//! that is not a 2xx response with a text body is reported as
//! [`PickerError::FetchFailed`] with the underlying message intact.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::error::{PickerError, PickerResult};

/// Source of stylesheet text.
pub trait CssFetcher {
    /// Fetch the CSS body at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = PickerResult<String>> + Send;
}

/// HTTP(S) fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> PickerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PickerError::FetchFailed(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl CssFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> PickerResult<String> {
        tracing::debug!(url, "Fetching stylesheet");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PickerError::FetchFailed(format!("Failed to fetch CSS: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PickerError::FetchFailed(format!(
                "Failed to fetch CSS: HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PickerError::FetchFailed(format!("Failed to read CSS body: {}", e)))
    }
}

/// Fetcher that reads local paths directly and sends everything else over HTTP.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> PickerResult<Self> {
        Ok(Self {
            http: HttpFetcher::new(timeout)?,
        })
    }
}

impl CssFetcher for SourceFetcher {
    async fn fetch(&self, url: &str) -> PickerResult<String> {
        match local_path(url) {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| PickerError::FetchFailed(format!("Failed to read {}: {}", url, e))),
            None => self.http.fetch(url).await,
        }
    }
}

/// Local filesystem path for `file://` URLs and plain paths.
fn local_path(url: &str) -> Option<&Path> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(Path::new(path));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return None;
    }
    Some(Path::new(url))
}
