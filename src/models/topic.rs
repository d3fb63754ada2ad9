//! Topic model.

use serde::{Deserialize, Serialize};

/// A topic articles are filed under. `slug` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

/// Body of `GET /api/topics`.
#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}
