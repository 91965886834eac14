//! Downloads the image referenced by a `/process-image` request.

use crate::config::FetchConfig;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(StatusCode),

    #[error("Image exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    pub fn outcome(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::Request(e) if e.is_timeout() => "timeout",
            FetchError::Request(_) => "network_error",
            FetchError::Status(_) => "bad_status",
            FetchError::TooLarge { .. } => "too_large",
        }
    }
}

/// HTTP client for image downloads with bounded time and size.
#[derive(Clone, Debug)]
pub struct ImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl ImageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            max_bytes: config.max_image_bytes,
        })
    }

    /// Fetches `url` and returns the body of a `200 OK` response.
    ///
    /// Any other final status is an error, as is a body larger than the
    /// configured limit (checked against `Content-Length` and while reading).
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        tracing::debug!(url = %url, "Fetching image");

        let mut response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(size = body.len(), "Image fetched");

        Ok(body)
    }
}
