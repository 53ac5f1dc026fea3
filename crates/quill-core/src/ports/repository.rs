use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;
use crate::query::PostQuery;

/// User repository - the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address (exact match on stored email).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A duplicate email fails with `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}

/// Post repository - the blog post store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// List posts matching `query`, ordered by post date descending.
    ///
    /// Returns the requested page together with the total number of matching
    /// posts ignoring pagination.
    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError>;

    /// Insert a new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Replace an existing post (last write wins). Fails with
    /// `RepoError::NotFound` if the id does not resolve.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Hard-delete a post. Fails with `RepoError::NotFound` if nothing was
    /// deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
