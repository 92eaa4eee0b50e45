//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use inkwell_core::domain::Post;

/// Wire representation of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            category: post.category,
            tags: post.tags,
            created_at: iso_utc(&post.created_at),
            updated_at: iso_utc(&post.updated_at),
        }
    }
}

/// ISO-8601 in UTC with a literal `Z`, e.g. `2024-05-01T10:00:00.123456Z`.
pub fn iso_utc(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
