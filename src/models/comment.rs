//! Comment model.
//!
//! Comments are never served directly; they exist so articles can report a comment count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub article_id: i64,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}
