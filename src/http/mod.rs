use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;

pub mod reqwest_client;

pub use reqwest_client::ReqwestClient;

use crate::Result;

/// Options accepted by [`HttpClient::get`]
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Explicitly requested method; anything other than GET is rejected
    pub method: Option<Method>,

    /// Extra request headers
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Fully read response of a GET request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Whether the status is in the 2xx range
    pub ok: bool,

    body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ok: (200..300).contains(&status),
            body: body.into(),
        }
    }

    /// Response body as text
    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn into_text(self) -> String {
        self.body
    }
}

/// Transport used to reach the platform.
///
/// Implementations must only perform GET requests and may fail with any
/// error; failures that are not a `CaptioneerError` are reported to callers
/// as network errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a single GET request
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse>;
}
