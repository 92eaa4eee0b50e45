//! Post entity for SeaORM.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

use inkwell_core::domain::{Post, PostFields};

/// Ordered tag list stored as a JSONB array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Tags,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Insertable row for a new post; the id is left to the sequence.
    pub fn new_post(fields: PostFields, now: DateTime<Utc>) -> Self {
        Self {
            id: NotSet,
            title: Set(fields.title),
            content: Set(fields.content),
            category: Set(fields.category),
            tags: Set(Tags(fields.tags)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags: model.tags.0,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from an edited Domain Post to an update ActiveModel.
///
/// `id` and `created_at` are immutable and stay `Unchanged`, so they are
/// never part of the `SET` clause.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(Tags(post.tags)),
            created_at: Unchanged(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
