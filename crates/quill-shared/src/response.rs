//! Response envelopes of the public API.

use serde::{Deserialize, Serialize};

use crate::dto::Article;

/// Fixed status value of successful responses.
pub const STATUS_OK: &str = "ok";

/// Listing envelope: total matches ignoring pagination plus one page of
/// shaped articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}

impl ArticleListResponse {
    pub fn new(total_results: u64, articles: Vec<Article>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            total_results,
            articles,
        }
    }
}

/// Single-article envelope used by the mutation and read-by-id endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub status: String,
    pub article: Article,
}

impl ArticleResponse {
    pub fn new(article: Article) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            article,
        }
    }
}

/// Message envelope for operations without a payload (logout, delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: message.into(),
        }
    }
}

/// Error body: a single `error` string alongside the 4xx/5xx status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
