//! Matching rules applied to an already-fetched feed.

use serde_json::Value;
use tracing::warn;

use crate::client::FeedError;
use crate::model::FeedResponse;

/// Take the `offers` list out of a feed response.
///
/// A body without `offers` (including an upstream `{"error": ...}` body) is
/// [`FeedError::NoOffers`]; an `offers` value that is not a list cannot be
/// filtered and is a processing error.
pub fn into_offers(feed: FeedResponse) -> Result<Vec<Value>, FeedError> {
    let FeedResponse::Json(Value::Object(mut body)) = feed else {
        return Err(FeedError::NoOffers);
    };

    if let Some(upstream_error) = body.get("error") {
        warn!(error = %upstream_error, "Upstream feed returned an error body");
    }

    match body.remove("offers") {
        None => Err(FeedError::NoOffers),
        Some(Value::Array(offers)) => Ok(offers),
        Some(other) => Err(FeedError::Processing(format!(
            "expected `offers` to be a list, got {}",
            type_name(&other)
        ))),
    }
}

/// First offer whose `offer_id` equals `offer_id` exactly.
pub fn find_offer(offers: Vec<Value>, offer_id: &str) -> Option<Value> {
    offers
        .into_iter()
        .find(|offer| offer.get("offer_id").and_then(Value::as_str) == Some(offer_id))
}

/// Case-insensitive equality on `store_name`; missing names never match.
pub fn store_matches(offer: &Value, store_name: &str) -> bool {
    let name = offer.get("store_name").and_then(Value::as_str).unwrap_or("");
    name.to_lowercase() == store_name.to_lowercase()
}

/// `categories` as a list: any element equal ignoring case.
/// `categories` as a string: case-insensitive substring.
pub fn category_matches(offer: &Value, category: &str) -> bool {
    let wanted = category.to_lowercase();
    match offer.get("categories") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|item| item.to_lowercase() == wanted),
        Some(Value::String(text)) => text.to_lowercase().contains(&wanted),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
