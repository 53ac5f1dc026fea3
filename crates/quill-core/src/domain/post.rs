use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a stored blog post.
///
/// `post_date` is the editorial publication date and drives list ordering;
/// `created_at`/`updated_at` are server-managed. `updated_at` is refreshed
/// on every modification and is always >= `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub category: String,
    pub image_url: String,
    pub post_date: DateTime<Utc>,
    pub author: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub post_date: Option<DateTime<Utc>>,
}

impl PostDraft {
    /// Check the required fields. Missing or empty fields fail validation.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("shortDescription", &self.short_description),
            ("category", &self.category),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "Missing required field: {field}"
                )));
            }
        }
        Ok(())
    }
}

/// Partial update - only supplied fields are overwritten.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub post_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post from a validated draft.
    ///
    /// `post_date` defaults to the creation time, `image_url` to an empty
    /// string, and `created_at == updated_at` at creation.
    pub fn create(draft: PostDraft, author: Option<Uuid>) -> Result<Self, DomainError> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            short_description: draft.short_description,
            category: draft.category,
            image_url: draft.image_url.unwrap_or_default(),
            post_date: draft.post_date.unwrap_or(now),
            author,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update in place, refreshing `updated_at`.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(short_description) = patch.short_description {
            self.short_description = short_description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(post_date) = patch.post_date {
            self.post_date = post_date;
        }
        self.updated_at = Utc::now();
    }
}
