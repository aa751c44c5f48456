//! Request and response types for the coupon feed.
//!
//! Offers are kept as opaque [`serde_json::Value`] objects. Only `offer_id`,
//! `store_name` and `categories` are ever read, and nothing is validated
//! beyond the presence of the `offers` key.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Body format requested from the upstream API.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Csv => "csv",
        }
    }
}

/// Parameters for one incremental feed fetch.
///
/// The default value fetches the full, currently active feed as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRequest {
    /// UNIX timestamp (seconds) of the previous extract.
    pub last_extract: Option<u64>,
    pub response_format: ResponseFormat,
    pub limit: Option<u32>,
    pub store_id: Option<String>,
    pub category: Option<String>,
    /// Ask the upstream not to advance its extract checkpoint.
    pub off_record: bool,
}

/// Query string sent to the upstream endpoint.
///
/// Optional values are only sent when they are truthy: `last_extract=0`,
/// `limit=0` and empty strings are indistinguishable from "not supplied" and
/// are dropped. Callers that need a zero checkpoint cannot express it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedQuery<'a> {
    #[serde(rename = "API_KEY")]
    pub api_key: &'a str,
    pub format: ResponseFormat,
    pub last_extract: Option<u64>,
    pub limit: Option<u32>,
    pub store_id: Option<&'a str>,
    pub category: Option<&'a str>,
    pub off_record: Option<&'static str>,
}

impl<'a> FeedQuery<'a> {
    pub fn new(api_key: &'a str, request: &'a FeedRequest) -> Self {
        Self {
            api_key,
            format: request.response_format,
            last_extract: request.last_extract.filter(|v| *v != 0),
            limit: request.limit.filter(|v| *v != 0),
            store_id: request.store_id.as_deref().filter(|s| !s.is_empty()),
            category: request.category.as_deref().filter(|s| !s.is_empty()),
            off_record: request.off_record.then_some("1"),
        }
    }
}

/// Raw CSV body, passed through without parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvFeed {
    pub data: String,
    pub format: ResponseFormat,
}

/// Result of a feed fetch, tagged by the requested format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeedResponse {
    /// Parsed JSON body, either `{"offers": [...]}` or an upstream `{"error": ...}`.
    Json(Value),
    /// Serializes as `{"data": <text>, "format": "csv"}`.
    Csv(CsvFeed),
}

impl FeedResponse {
    pub fn csv(data: String) -> Self {
        FeedResponse::Csv(CsvFeed {
            data,
            format: ResponseFormat::Csv,
        })
    }

    pub fn into_value(self) -> Value {
        match self {
            FeedResponse::Json(body) => body,
            FeedResponse::Csv(csv) => serde_json::json!({
                "data": csv.data,
                "format": csv.format,
            }),
        }
    }
}

/// Offers belonging to one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOffers {
    pub store_name: String,
    pub offer_count: usize,
    pub offers: Vec<Value>,
}

/// Offers tagged with one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOffers {
    pub category: String,
    pub offer_count: usize,
    pub offers: Vec<Value>,
}
