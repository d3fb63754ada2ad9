//! Article models and the vote payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// An article row as stored. This is the success body of `PATCH /api/articles/{article_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub votes: i64,
}

/// An article joined with the number of comments referencing it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleWithCommentCount {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub comment_count: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub votes: i64,
}

/// Body of `GET /api/articles/{article_id}`.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: ArticleWithCommentCount,
}

/// Validated body of `PATCH /api/articles/{article_id}`. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct VoteIncrement {
    pub inc_votes: i64,
}

/// An article as it appears in a seed fixture, before an id is assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i64,
}
