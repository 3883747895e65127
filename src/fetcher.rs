//! Retrieval of the raw published documents.

use std::collections::HashMap;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::config::Source;
use crate::error::IngestError;

/// Anything that can turn a [`Source`] into its raw text body.
///
/// Implementations must fail rather than return an empty body.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, source: &Source) -> Result<String, IngestError>;
}

/// Single blocking GET per source. No retries, no redirects beyond the
/// client defaults, any non-2xx status is fatal.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, IngestError> {
        let client = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| IngestError::FetchError {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(HttpFetcher { client })
    }
}

fn header_map(source: &Source) -> Result<HeaderMap, IngestError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &source.headers {
        let invalid = |e: &dyn std::fmt::Display| IngestError::FetchError {
            url: source.url.clone(),
            reason: format!("invalid header {name}: {e}"),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, source: &Source) -> Result<String, IngestError> {
        let fail = |reason: String| IngestError::FetchError {
            url: source.url.clone(),
            reason,
        };

        debug!(event = "Fetch", phase = "Request", url = source.url.as_str());

        let response = self
            .client
            .get(&source.url)
            .headers(header_map(source)?)
            .send()
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("unexpected status {status}")));
        }

        let body = response.text().map_err(|e| fail(e.to_string()))?;
        if body.is_empty() {
            return Err(fail("empty response body".to_string()));
        }

        debug!(
            event = "Fetch",
            phase = "Response",
            url = source.url.as_str(),
            status = status.as_u16(),
            bytes = body.len()
        );
        Ok(body)
    }
}

/// Serves canned bodies keyed by URL. Unknown URLs fail like a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, source: &Source) -> Result<String, IngestError> {
        match self.bodies.get(&source.url) {
            Some(body) if !body.is_empty() => Ok(body.clone()),
            Some(_) => Err(IngestError::FetchError {
                url: source.url.clone(),
                reason: "empty response body".to_string(),
            }),
            None => Err(IngestError::FetchError {
                url: source.url.clone(),
                reason: "unexpected status 404 Not Found".to_string(),
            }),
        }
    }
}
