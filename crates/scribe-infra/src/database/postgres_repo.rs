//! PostgreSQL repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::PageWindow;
use scribe_core::ports::{PostRepository, UserRepository};
use scribe_core::search::SearchTerm;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        // The unique index still guards concurrent inserts
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }

        let active_model: user::ActiveModel = user.into();

        let model = active_model.insert(&*self.db).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
                RepoError::Constraint(detail)
            } else {
                query_error(e)
            }
        })?;

        Ok(model.into())
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = Post::new(draft).into();
        let model = active_model.insert(&*self.db).await.map_err(query_error)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel {
            id: Set(id),
            title: Set(draft.title),
            body: Set(draft.body),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model.update(&*self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_error(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&*self.db)
            .await
            .map_err(query_error)
    }

    async fn list_recent(&self, window: PageWindow) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .offset(window.skip)
            .limit(window.limit)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Post>, RepoError> {
        // Sanitized terms carry no LIKE wildcards
        let pattern = format!("%{}%", term.as_str().to_lowercase());

        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(post::Column::Title))).like(pattern.as_str()))
                    .add(Expr::expr(Func::lower(Expr::col(post::Column::Body))).like(pattern.as_str())),
            )
            .order_by_desc(post::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
