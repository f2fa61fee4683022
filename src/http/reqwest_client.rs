use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;

use super::{HttpClient, HttpResponse, RequestOptions};
use crate::config::HttpConfig;
use crate::errors::CaptioneerError;
use crate::Result;

/// reqwest-backed transport.
///
/// The default client hands back every response with its `ok` flag and leaves
/// classification to the caller. A strict client turns non-success statuses,
/// timeouts and transport failures into network errors itself.
pub struct ReqwestClient {
    client: Client,
    strict: bool,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            strict: false,
        }
    }

    /// Client with a request deadline
    pub fn with_timeout(timeout: Duration, strict: bool) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, strict })
    }

    /// Strict client that fails on any non-success status
    pub fn strict(timeout: Duration) -> Result<Self> {
        Self::with_timeout(timeout, true)
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Self::with_timeout(Duration::from_secs(config.timeout_secs), config.strict)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn transport_error(&self, error: reqwest::Error) -> anyhow::Error {
        if !self.strict {
            return error.into();
        }

        if error.is_timeout() {
            CaptioneerError::timeout(&error).with_source(error).into()
        } else {
            CaptioneerError::network(format!("ReqwestClient error: {}", error))
                .with_source(error)
                .into()
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        if let Some(method) = &options.method {
            if *method != Method::GET {
                return Err(CaptioneerError::network(
                    "Only GET requests are supported for fetching YouTube captions",
                )
                .into());
            }
        }

        let mut request = self.client.get(url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!("GET {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if self.strict && status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CaptioneerError::rate_limited(format!("HTTP {} from {}", status, url)).into());
        }
        if self.strict && !status.is_success() {
            return Err(CaptioneerError::network(format!(
                "Failed to fetch captions. Status: {}",
                status
            ))
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(HttpResponse::new(status.as_u16(), body))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}
