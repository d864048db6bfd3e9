//! HTTP fetch of the remote quote list

use inkboard_core::SourceError;
use reqwest::StatusCode;
use std::time::Duration;

/// Downloads the raw quote list from a fixed endpoint
pub struct RemoteFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let endpoint = endpoint.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("inkboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Request {
                url: endpoint.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and return the body. Anything but 200 is an error.
    pub async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let request_error = |e: reqwest::Error| SourceError::Request {
            url: self.endpoint.clone(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        log::debug!("Fetched {} bytes from {}", body.len(), self.endpoint);
        Ok(body.to_vec())
    }
}
