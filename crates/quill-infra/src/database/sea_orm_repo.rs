//! SeaORM-backed repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};
use quill_core::query::PostQuery;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Escape LIKE wildcards in user-supplied search text.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

/// PostgreSQL user repository. The pooled connection is shared with the
/// post repository through the `Arc`.
pub struct SeaOrmUserRepository {
    db: Arc<DbConn>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = new_user.into();
        let model = active.insert(self.db.as_ref()).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Email already registered".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }
}

/// PostgreSQL post repository.
pub struct SeaOrmPostRepository {
    db: Arc<DbConn>,
}

impl SeaOrmPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    fn filtered(query: &PostQuery) -> sea_orm::Select<PostEntity> {
        let mut select = PostEntity::find();

        if let Some(category) = &query.category {
            select = select.filter(post::Column::Category.eq(category.clone()));
        }

        if let Some(q) = &query.q {
            let pattern = format!("%{}%", escape_like(q));
            select = select.filter(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(post::Column::ShortDescription).ilike(pattern.clone()))
                    .add(Expr::col(post::Column::Description).ilike(pattern)),
            );
        }

        select
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        // Most recent first; created_at then id keep equal dates deterministic.
        let select = Self::filtered(query)
            .order_by_desc(post::Column::PostDate)
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id);

        let paginator = select.paginate(self.db.as_ref(), query.limit());
        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator
            .fetch_page(query.page() - 1)
            .await
            .map_err(query_err)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn insert(&self, new_post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(self.db.as_ref()).await.map_err(query_err)?;

        Ok(model.into())
    }

    async fn update(&self, updated: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = updated.into();
        let model = active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
