//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

use inkwell_core::domain::{self, Post, PostFields};
use inkwell_core::error::RepoError;
use inkwell_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

const LIKE_ESCAPE: char = '\\';

/// Lowercased `%term%` pattern with LIKE wildcards in `term` escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `LOWER(column) LIKE pattern ESCAPE '\'`
fn contains_ci(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(term) = term.filter(|t| !t.is_empty()) {
            tracing::debug!(term, "Searching posts");
            let pattern = contains_pattern(term);
            query = query.filter(
                Condition::any()
                    .add(contains_ci(post::Column::Title, &pattern))
                    .add(contains_ci(post::Column::Content, &pattern))
                    .add(contains_ci(post::Column::Category, &pattern)),
            );
        }

        let result = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let model = post::ActiveModel::new_post(fields, domain::now())
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut post = Post::from(existing);
        post.overwrite(fields, domain::now());

        let model = post::ActiveModel::from(post)
            .update(&txn)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post updated");
        Ok(model.into())
    }
}
