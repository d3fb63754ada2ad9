//! User model.

use serde::{Deserialize, Serialize};

/// A registered user. Only these three fields are ever exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}
