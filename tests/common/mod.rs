#![allow(dead_code)]

use async_trait::async_trait;
use coupon_feed_mcp::client::{FeedError, FeedTransport};
use coupon_feed_mcp::model::FeedQuery;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const ENDPOINT: &str = "http://feed.test/api/getIncrementalFeed/";

/// Transport that replays canned bodies and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<Vec<Result<String, FeedError>>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<String, FeedError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self::new(vec![Ok(body.into())])
    }

    pub fn with_feed(feed: Value) -> Self {
        Self::with_body(feed.to_string())
    }

    /// Recorded requests as `(endpoint, serialized query)`.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FeedTransport for MockTransport {
    async fn get(&self, endpoint: &str, query: &FeedQuery<'_>) -> Result<String, FeedError> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), serde_json::to_value(query).unwrap()));

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            Err(FeedError::UpstreamRequest(
                "No more mock responses".to_string(),
            ))
        }
    }
}

pub fn sample_feed() -> Value {
    json!({
        "offers": [
            {
                "offer_id": "X123",
                "store_name": "Acme",
                "categories": ["Shoes", "Sale"],
                "title": "20% off sneakers"
            },
            {
                "offer_id": "X124",
                "store_name": "ACME",
                "categories": "running shoes and gear",
                "title": "Free shipping"
            },
            {
                "offer_id": "X125",
                "store_name": "Acme Corp",
                "categories": ["Apparel"],
                "title": "Buy one get one"
            },
            {
                "offer_id": "X126",
                "store_name": "acme",
                "categories": null,
                "title": "Clearance"
            },
            {
                "offer_id": "X127",
                "categories": ["shoes"],
                "title": "No store"
            }
        ]
    })
}
