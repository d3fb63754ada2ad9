//! Request validators.
//!
//! Run before any data access; every failure is a `BadRequest`.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::VoteIncrement;

/// Parse an `article_id` path segment.
///
/// Accepts an optional leading `-` followed by ASCII digits that fit in an `i64`.
/// Existence is not checked here.
pub fn validate_article_id(raw: &str) -> Result<i64, AppError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!(
            "article_id {:?} is not an integer",
            raw
        )));
    }

    raw.parse::<i64>()
        .map_err(|e| AppError::BadRequest(format!("article_id {:?} out of range: {}", raw, e)))
}

/// Validate a vote patch body. `None` means the request carried no usable JSON.
pub fn validate_vote_increment(body: Option<&Value>) -> Result<VoteIncrement, AppError> {
    let body = body.ok_or_else(|| AppError::BadRequest("missing JSON body".to_string()))?;

    if !body.is_object() {
        return Err(AppError::BadRequest(
            "vote body must be a JSON object".to_string(),
        ));
    }

    VoteIncrement::deserialize(body)
        .map_err(|e| AppError::BadRequest(format!("invalid inc_votes: {}", e)))
}
