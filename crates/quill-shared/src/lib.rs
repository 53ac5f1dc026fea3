//! # Quill Shared
//!
//! Request/response types of the public API surface, including the article
//! projection of stored posts.

pub mod dto;
pub mod response;

pub use dto::Article;
pub use response::ErrorBody;
