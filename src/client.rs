//! Feed client, transport trait and error types.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::filters;
use crate::http::HttpTransport;
use crate::model::{CategoryOffers, FeedQuery, FeedRequest, FeedResponse, ResponseFormat, StoreOffers};
use crate::options::{FeedConfig, API_KEY_VAR};

/// Errors that can occur while fetching or filtering the feed.
///
/// `NoOffers` and `OfferNotFound` are soft conditions: the upstream call
/// succeeded but there is nothing to return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("{0}")]
    Configuration(String),

    #[error("API request failed: {0}")]
    UpstreamRequest(String),

    #[error("Error processing coupon feed: {0}")]
    Processing(String),

    #[error("No offers found in feed")]
    NoOffers,

    #[error("Offer with ID {0} not found")]
    OfferNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FeedError {
    pub fn missing_api_key() -> Self {
        FeedError::Configuration(format!("{API_KEY_VAR} environment variable is required"))
    }

    /// Whether the error is a not-found result rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NoOffers | FeedError::OfferNotFound(_))
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        FeedError::UpstreamRequest(err.without_url().to_string())
    }
}

/// Performs the single GET against the upstream endpoint.
///
/// Implementations return the raw response body on a 2xx status and
/// [`FeedError::UpstreamRequest`] for anything else. They must not retry.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, endpoint: &str, query: &FeedQuery<'_>) -> Result<String, FeedError>;
}

#[async_trait]
impl<T: FeedTransport + ?Sized> FeedTransport for Arc<T> {
    async fn get(&self, endpoint: &str, query: &FeedQuery<'_>) -> Result<String, FeedError> {
        (**self).get(endpoint, query).await
    }
}

/// Client for the CouponAPI.org incremental feed.
///
/// Holds no per-call state; every method performs at most one upstream
/// request and can be called concurrently.
#[derive(Debug, Clone)]
pub struct FeedClient<T = HttpTransport> {
    config: FeedConfig,
    transport: T,
}

impl FeedClient<HttpTransport> {
    /// Create a client that talks HTTP using the config's transport options.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let transport = HttpTransport::for_feed(&config.transport)?;
        Ok(Self { config, transport })
    }
}

impl<T: FeedTransport> FeedClient<T> {
    pub fn with_transport(config: FeedConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch the incremental feed.
    ///
    /// Fails with [`FeedError::Configuration`] before touching the network
    /// when no API key is configured. JSON bodies are parsed; CSV bodies are
    /// returned verbatim.
    pub async fn fetch(&self, request: &FeedRequest) -> Result<FeedResponse, FeedError> {
        let api_key = self.config.api_key().ok_or_else(FeedError::missing_api_key)?;
        let query = FeedQuery::new(api_key, request);

        debug!(
            format = query.format.as_str(),
            last_extract = ?query.last_extract,
            limit = ?query.limit,
            store_id = ?query.store_id,
            category = ?query.category,
            off_record = request.off_record,
            "Fetching incremental feed"
        );

        let body = self.transport.get(&self.config.endpoint, &query).await?;

        match request.response_format {
            ResponseFormat::Json => serde_json::from_str::<Value>(&body)
                .map(FeedResponse::Json)
                .map_err(|e| FeedError::Processing(e.to_string())),
            ResponseFormat::Csv => Ok(FeedResponse::csv(body)),
        }
    }

    /// Look up a single offer by its exact, case-sensitive `offer_id`.
    pub async fn offer_details(&self, offer_id: &str) -> Result<Value, FeedError> {
        require_non_empty("offer_id", offer_id)?;
        let offers = filters::into_offers(self.fetch(&FeedRequest::default()).await?)?;

        filters::find_offer(offers, offer_id)
            .ok_or_else(|| FeedError::OfferNotFound(offer_id.to_string()))
    }

    /// All offers whose `store_name` matches case-insensitively, in feed order.
    pub async fn offers_by_store(&self, store_name: &str) -> Result<StoreOffers, FeedError> {
        require_non_empty("store_name", store_name)?;
        let offers = filters::into_offers(self.fetch(&FeedRequest::default()).await?)?;

        let offers: Vec<Value> = offers
            .into_iter()
            .filter(|offer| filters::store_matches(offer, store_name))
            .collect();
        info!(store_name, matched = offers.len(), "Filtered offers by store");

        Ok(StoreOffers {
            store_name: store_name.to_string(),
            offer_count: offers.len(),
            offers,
        })
    }

    /// All offers tagged with `category`, in feed order.
    pub async fn offers_by_category(&self, category: &str) -> Result<CategoryOffers, FeedError> {
        require_non_empty("category", category)?;
        let offers = filters::into_offers(self.fetch(&FeedRequest::default()).await?)?;

        let offers: Vec<Value> = offers
            .into_iter()
            .filter(|offer| filters::category_matches(offer, category))
            .collect();
        info!(category, matched = offers.len(), "Filtered offers by category");

        Ok(CategoryOffers {
            category: category.to_string(),
            offer_count: offers.len(),
            offers,
        })
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), FeedError> {
    if value.is_empty() {
        return Err(FeedError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}
