//! # coupon-feed-mcp
//!
//! Exposes the CouponAPI.org incremental offer feed to agent runtimes as a
//! set of MCP tools.
//!
//! ## Architecture
//!
//! 1. **`FeedConfig`** holds the API key, endpoint and transport options.
//!    It is built once at startup.
//! 2. **`FeedClient`** makes one GET per call through a `FeedTransport`
//!    and filters the returned offers in memory.
//! 3. **`CouponFeedServer`** wraps the client as an `rmcp` tool server.
//!
//! ## Tools
//!
//! - `get_incremental_feed`: raw feed access (JSON or CSV)
//! - `get_offer_details`: one offer by exact ID
//! - `get_offers_by_store`: offers for a store, case-insensitive
//! - `get_offers_by_category`: offers for a category, case-insensitive
//!
//! ## Example
//! ```no_run
//! use coupon_feed_mcp::{FeedClient, FeedConfig, FeedRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::new(FeedConfig::new("your-api-key"))?;
//!     let feed = client.fetch(&FeedRequest::default()).await?;
//!     println!("{:?}", feed);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filters;
pub mod http;
pub mod mcp;
pub mod model;
pub mod options;
pub mod tools;

pub use client::{FeedClient, FeedError, FeedTransport};
pub use http::HttpTransport;
pub use mcp::CouponFeedServer;
pub use model::{CategoryOffers, FeedQuery, FeedRequest, FeedResponse, ResponseFormat, StoreOffers};
pub use options::{FeedConfig, TransportOptions};

// Re-export rmcp for convenience
pub use rmcp;
