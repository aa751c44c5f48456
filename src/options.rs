//! Feed and transport configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Production endpoint of the CouponAPI.org incremental feed.
pub const DEFAULT_ENDPOINT: &str = "https://couponapi.org/api/getIncrementalFeed/";

/// Upstream request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the upstream API key.
pub const API_KEY_VAR: &str = "COUPON_API_KEY";
/// Environment variable overriding the upstream endpoint.
pub const ENDPOINT_VAR: &str = "COUPON_API_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "COUPON_API_TIMEOUT_SECS";
/// Environment variable routing upstream requests through a proxy.
pub const PROXY_VAR: &str = "COUPON_API_PROXY";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Transport configuration options.
///
/// Controls how requests are sent over the network.
#[derive(Debug, Clone)]
pub enum TransportOptions {
    /// HTTP transport configuration
    Http {
        /// Request timeout. If None, the client has no timeout.
        timeout: Option<Duration>,
        /// HTTP proxy URL for all upstream requests.
        proxy: Option<String>,
    },
}

impl Default for TransportOptions {
    fn default() -> Self {
        TransportOptions::Http {
            timeout: Some(DEFAULT_TIMEOUT),
            proxy: None,
        }
    }
}

impl TransportOptions {
    /// Create new default HTTP transport options (30 second timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        match &mut self {
            TransportOptions::Http { timeout, .. } => *timeout = Some(duration),
        }
        self
    }

    /// Set the proxy.
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        match &mut self {
            TransportOptions::Http { proxy, .. } => *proxy = Some(proxy_url),
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self {
            TransportOptions::Http { timeout, .. } => *timeout,
        }
    }

    pub fn proxy(&self) -> Option<&str> {
        match self {
            TransportOptions::Http { proxy, .. } => proxy.as_deref(),
        }
    }
}

/// Everything the feed client needs to talk to the upstream API.
///
/// Built once at startup and handed to [`FeedClient`](crate::client::FeedClient).
/// A missing API key is not an error here: the server still starts and lists
/// its tools, and every fetch fails with a configuration error instead.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    api_key: Option<SecretString>,
    pub endpoint: String,
    pub transport: TransportOptions,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            transport: TransportOptions::default(),
        }
    }
}

impl FeedConfig {
    /// Create a config for the production endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// The API key, if one was configured and is non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
    }

    /// Load configuration from the process environment.
    ///
    /// Reads a `.env` file first if one exists, then `COUPON_API_KEY`,
    /// `COUPON_API_URL`, `COUPON_API_TIMEOUT_SECS` and `COUPON_API_PROXY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(API_KEY_VAR) {
            config = config.with_api_key(key);
        }

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|e| !e.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    value: raw,
                });
            }
            config.transport = config.transport.with_timeout(Duration::from_secs(secs));
        }

        if let Some(proxy) = lookup(PROXY_VAR).filter(|p| !p.trim().is_empty()) {
            config.transport = config.transport.with_proxy(proxy.trim().to_string());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_variables() {
        let config = FeedConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.transport.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.transport.proxy(), None);
    }

    #[test]
    fn reads_key_endpoint_and_timeout() {
        let config = FeedConfig::from_lookup(lookup(&[
            ("COUPON_API_KEY", "secret"),
            ("COUPON_API_URL", "http://localhost:9000/feed"),
            ("COUPON_API_TIMEOUT_SECS", "5"),
            ("COUPON_API_PROXY", " http://proxy.internal:3128 "),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.endpoint, "http://localhost:9000/feed");
        assert_eq!(config.transport.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.transport.proxy(), Some("http://proxy.internal:3128"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = FeedConfig::from_lookup(lookup(&[("COUPON_API_KEY", "")])).unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = FeedConfig::from_lookup(lookup(&[("COUPON_API_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("COUPON_API_TIMEOUT_SECS"));

        assert!(FeedConfig::from_lookup(lookup(&[("COUPON_API_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn key_is_redacted_in_debug_output() {
        let config = FeedConfig::new("top-secret");
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
