//! Data models for the news API.
//!
//! Field names and order match the JSON the API has always returned.

mod article;
mod comment;
mod topic;
mod user;

pub use article::*;
pub use comment::*;
pub use topic::*;
pub use user::*;

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2020-07-09T20:11:00.000Z`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
