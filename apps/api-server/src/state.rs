//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, UserRepository};
use quill_infra::{
    DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, SeaOrmPostRepository,
    SeaOrmUserRepository,
};

/// Shared application state: the credential store and the post store.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// The pooled database connection is established once here and shared
    /// by both repositories for the lifetime of the process. Without a
    /// configured database the server falls back to in-memory stores.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        match db_config {
            Some(config) => match quill_infra::connect(config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    Self {
                        users: Arc::new(SeaOrmUserRepository::new(conn.clone())),
                        posts: Arc::new(SeaOrmPostRepository::new(conn)),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        }
    }

    /// In-memory stores - fallback mode and the test substrate.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }
}
