//! HTTP transport for the upstream coupon feed.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, trace, warn};

use crate::client::{FeedError, FeedTransport};
use crate::model::FeedQuery;
use crate::options::TransportOptions;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    match transport_options {
        TransportOptions::Http { timeout, proxy, .. } => {
            if let Some(t) = timeout {
                builder = builder.timeout(*t);
            }
            if let Some(proxy_url) = proxy {
                builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
            }
        }
    }

    builder.build()
}

/// Longest body prefix written to trace logs.
const BODY_PREVIEW_BYTES: usize = 512;

/// At most `max` bytes of `text`, cut on a char boundary.
fn preview(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Extension trait for Response that logs the response size.
#[async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;
}

#[async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        debug!("API response ({} bytes)", text.len());
        trace!("API response preview:\n{}", preview(&text, BODY_PREVIEW_BYTES));
        Ok(text)
    }
}

/// [`FeedTransport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(transport_options: &TransportOptions) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(transport_options)?,
        })
    }

    /// Like [`HttpTransport::new`], reporting failure as a configuration error.
    pub fn for_feed(transport_options: &TransportOptions) -> Result<Self, FeedError> {
        Self::new(transport_options)
            .map_err(|e| FeedError::Configuration(format!("failed to build HTTP client: {e}")))
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, endpoint: &str, query: &FeedQuery<'_>) -> Result<String, FeedError> {
        let response = self.client.get(endpoint).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            warn!(%status, body_len = body.len(), "Upstream feed request failed");
            return Err(FeedError::UpstreamRequest(format!("upstream returned HTTP {status}")));
        }

        Ok(response.text_logged().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(preview("{\"offers\":[]}", 512), "{\"offers\":[]}");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(600);
        let cut = preview(&body, 513);
        assert_eq!(cut.len(), 512);
        assert!(body.starts_with(cut));
    }

    #[test]
    fn invalid_proxy_fails_client_build() {
        let options = TransportOptions::new().with_proxy("http://[::1".to_string());
        assert!(matches!(
            HttpTransport::for_feed(&options),
            Err(FeedError::Configuration(_))
        ));
    }

    #[test]
    fn valid_proxy_builds_client() {
        let options = TransportOptions::new().with_proxy("http://127.0.0.1:3128".to_string());
        assert!(HttpTransport::for_feed(&options).is_ok());
    }
}
