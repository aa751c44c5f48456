use std::time::Duration;
use coupon_feed_mcp::options::{FeedConfig, TransportOptions, DEFAULT_ENDPOINT};

#[test]
fn test_transport_options_builder() {
    let options = TransportOptions::new()
        .with_timeout(Duration::from_secs(10))
        .with_proxy("http://proxy.example.com".to_string());

    match options {
        TransportOptions::Http { timeout, proxy } => {
            assert_eq!(timeout, Some(Duration::from_secs(10)));
            assert_eq!(proxy, Some("http://proxy.example.com".to_string()));
        }
    }
}

#[test]
fn test_feed_config_proxy_from_lookup() {
    let config = FeedConfig::from_lookup(|name| {
        (name == "COUPON_API_PROXY").then(|| "http://proxy.example.com:8080".to_string())
    })
    .unwrap();

    assert_eq!(config.transport.proxy(), Some("http://proxy.example.com:8080"));
}

#[test]
fn test_transport_options_default_timeout() {
    assert_eq!(TransportOptions::new().timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn test_feed_config_new() {
    let config = FeedConfig::new("test-key");

    assert_eq!(config.api_key(), Some("test-key"));
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn test_feed_config_custom() {
    let config = FeedConfig::default()
        .with_endpoint("http://127.0.0.1:8080/feed")
        .with_transport(TransportOptions::new().with_timeout(Duration::from_secs(2)));

    assert_eq!(config.api_key(), None);
    assert_eq!(config.endpoint, "http://127.0.0.1:8080/feed");
    assert_eq!(config.transport.timeout(), Some(Duration::from_secs(2)));
}
