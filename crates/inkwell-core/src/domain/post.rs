use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Current time truncated to the microsecond precision PostgreSQL stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a post, as produced by payload validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl Post {
    /// Build a freshly created post; both timestamps are `now`.
    pub fn create(id: i64, fields: PostFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every writable field and refresh `updated_at`.
    ///
    /// `id` and `created_at` are left untouched. The new `updated_at` is
    /// always strictly later than the previous one, even when `now` falls
    /// within the same microsecond.
    pub fn overwrite(&mut self, fields: PostFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.content = fields.content;
        self.category = fields.category;
        self.tags = fields.tags;
        self.updated_at = now.max(self.updated_at + Duration::microseconds(1));
    }

    /// Case-insensitive substring match over title, content and category.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.content, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
