//! In-memory repositories.
//!
//! Used as the fallback when no database is configured and as the store
//! under the handler tests. Insertion order is preserved, which gives the
//! listing its stable tiebreak for equal post dates. Data is lost on
//! process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};
use quill_core::query::PostQuery;

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, new_user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint(
                "Email already registered".to_string(),
            ));
        }
        users.push(new_user.clone());
        Ok(new_user)
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        let posts = self.posts.read().await;

        let mut matching: Vec<Post> = posts.iter().filter(|p| query.matches(p)).cloned().collect();
        // Stable sort keeps insertion order for equal post dates.
        matching.sort_by(|a, b| b.post_date.cmp(&a.post_date));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn insert(&self, new_post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        posts.push(new_post.clone());
        Ok(new_post)
    }

    async fn update(&self, updated: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                Ok(updated)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
