//! MCP server exposing the feed client as four tools.

use std::sync::Arc;

use rmcp::handler::server::{router::tool::ToolRouter, wrapper::Parameters};
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::{FeedClient, FeedError, FeedTransport};
use crate::http::HttpTransport;
use crate::model::{FeedRequest, FeedResponse};
use crate::options::FeedConfig;
use crate::tools::{CategoryArgs, IncrementalFeedArgs, OfferDetailsArgs, StoreArgs};

/// Name reported to MCP clients during initialization.
pub const SERVER_NAME: &str = "coupon-feed-server";

/// Feed client with its transport erased, as held by the server.
pub type SharedFeedClient = FeedClient<Arc<dyn FeedTransport>>;

#[derive(Clone)]
pub struct CouponFeedServer {
    client: Arc<SharedFeedClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CouponFeedServer {
    pub fn new(client: SharedFeedClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }

    /// Server backed by the real HTTP transport.
    pub fn from_config(config: FeedConfig) -> Result<Self, FeedError> {
        let transport = HttpTransport::for_feed(&config.transport)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<T: FeedTransport + 'static>(config: FeedConfig, transport: T) -> Self {
        let transport: Arc<dyn FeedTransport> = Arc::new(transport);
        Self::new(FeedClient::with_transport(config, transport))
    }

    #[tool(
        description = "Get incremental feed of coupon offers from CouponAPI.org. Returns new, updated, and suspended offers since the last extract time. If no last_extract is provided, returns all currently active offers. Set off_record=true to avoid updating the last extract time in the system."
    )]
    async fn get_incremental_feed(
        &self,
        Parameters(args): Parameters<IncrementalFeedArgs>,
    ) -> Result<CallToolResult, McpError> {
        let request = FeedRequest::from(args);
        let result = self.client.fetch(&request).await.map(FeedResponse::into_value);
        respond("get_incremental_feed", result)
    }

    #[tool(
        description = "Get detailed information for a specific offer. Filters the full incremental feed for the given offer ID."
    )]
    async fn get_offer_details(
        &self,
        Parameters(OfferDetailsArgs { offer_id }): Parameters<OfferDetailsArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_offer_details", self.client.offer_details(&offer_id).await)
    }

    #[tool(description = "Get all current offers for a specific store name (case-insensitive).")]
    async fn get_offers_by_store(
        &self,
        Parameters(StoreArgs { store_name }): Parameters<StoreArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_offers_by_store", self.client.offers_by_store(&store_name).await)
    }

    #[tool(description = "Get all current offers for a specific category (case-insensitive).")]
    async fn get_offers_by_category(
        &self,
        Parameters(CategoryArgs { category }): Parameters<CategoryArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_offers_by_category", self.client.offers_by_category(&category).await)
    }
}

#[tool_handler]
impl ServerHandler for CouponFeedServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Coupon feed server. Use get_incremental_feed for raw feed access, or get_offer_details, get_offers_by_store and get_offers_by_category to search the active offers."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Turn an operation result into a tool result.
///
/// Every failure is reported the same way: an error tool result whose text
/// is `{"error": "<message>"}`.
fn respond<T: Serialize>(tool: &str, result: Result<T, FeedError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let text = serde_json::to_string(&value)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            debug!(tool, bytes = text.len(), "Tool call succeeded");
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(err) => {
            if err.is_not_found() {
                info!(tool, error = %err, "Tool call found nothing");
            } else {
                warn!(tool, error = %err, "Tool call failed");
            }
            let payload = json!({ "error": err.to_string() });
            Ok(CallToolResult::error(vec![Content::text(payload.to_string())]))
        }
    }
}
