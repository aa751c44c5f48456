//! Argument types for the exposed MCP tools.
//!
//! The schemas generated from these structs are what the host runtime shows
//! to the model, so the field descriptions matter.

use rmcp::schemars;
use serde::Deserialize;

use crate::model::{FeedRequest, ResponseFormat};

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct IncrementalFeedArgs {
    #[schemars(
        description = "Last extract timestamp as UNIX timestamp in seconds (epoch). If not provided, returns all active offers."
    )]
    pub last_extract: Option<u64>,

    #[schemars(description = "Response format: 'json' or 'csv'. Defaults to 'json'.")]
    pub response_format: Option<ResponseFormat>,

    #[schemars(description = "Maximum number of offers to return. Optional parameter.")]
    pub limit: Option<u32>,

    #[schemars(description = "Filter by specific store ID. Optional parameter.")]
    pub store_id: Option<String>,

    #[schemars(description = "Filter by category. Optional parameter.")]
    pub category: Option<String>,

    #[schemars(
        description = "When true, does not update the last extract time, allowing repeated retrieval of incremental data. Defaults to false."
    )]
    pub off_record: Option<bool>,
}

impl From<IncrementalFeedArgs> for FeedRequest {
    fn from(args: IncrementalFeedArgs) -> Self {
        FeedRequest {
            last_extract: args.last_extract,
            response_format: args.response_format.unwrap_or_default(),
            limit: args.limit,
            store_id: args.store_id,
            category: args.category,
            off_record: args.off_record.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct OfferDetailsArgs {
    #[schemars(description = "The unique offer ID to get details for")]
    pub offer_id: String,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct StoreArgs {
    #[schemars(description = "Store name to filter offers by")]
    pub store_name: String,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct CategoryArgs {
    #[schemars(description = "Category to filter offers by")]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_arguments_use_defaults() {
        let args: IncrementalFeedArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!(FeedRequest::from(args), FeedRequest::default());
    }

    #[test]
    fn arguments_map_onto_request() {
        let args: IncrementalFeedArgs = serde_json::from_value(json!({
            "last_extract": 1_700_000_000u64,
            "response_format": "csv",
            "limit": 10,
            "store_id": "77",
            "category": "travel",
            "off_record": true,
        }))
        .unwrap();

        let request = FeedRequest::from(args);
        assert_eq!(request.last_extract, Some(1_700_000_000));
        assert_eq!(request.response_format, ResponseFormat::Csv);
        assert_eq!(request.limit, Some(10));
        assert_eq!(request.store_id.as_deref(), Some("77"));
        assert_eq!(request.category.as_deref(), Some("travel"));
        assert!(request.off_record);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let parsed = serde_json::from_value::<IncrementalFeedArgs>(json!({ "response_format": "xml" }));
        assert!(parsed.is_err());
    }
}
