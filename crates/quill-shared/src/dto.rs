//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use quill_core::domain::Post;

/// Fixed constant identifying this API in article projections.
pub const ARTICLE_SOURCE: &str = "quill";

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user's public projection - never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Login/registration response: public projection plus the identity artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub category: String,
    pub image_url: Option<String>,
    pub post_date: Option<String>,
}

/// Partial update of a post - absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub post_date: Option<String>,
}

/// Query parameters of the post listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Public article projection of a stored post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub url_to_image: String,
    pub published_at: String,
    pub content: String,
    pub category: String,
    pub id: String,
}

impl From<&Post> for Article {
    fn from(post: &Post) -> Self {
        Self {
            source: ARTICLE_SOURCE.to_string(),
            author: post
                .author
                .map(|id| id.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            title: post.title.clone(),
            description: post.description.clone(),
            short_description: post.short_description.clone(),
            url_to_image: post.image_url.clone(),
            published_at: post.post_date.to_rfc3339(),
            content: post.description.clone(),
            category: post.category.clone(),
            id: post.id.to_string(),
        }
    }
}

/// Normalize a client-supplied post date to a UTC timestamp.
///
/// Accepts RFC 3339 as well as a plain `YYYY-MM-DD` date (taken as
/// midnight UTC). Returns `None` for anything unparseable.
pub fn parse_post_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = value.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    value
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::PostDraft;
    use uuid::Uuid;

    #[test]
    fn article_projects_author_and_source() {
        let author = Uuid::new_v4();
        let post = Post::create(
            PostDraft {
                title: "Title".to_string(),
                description: "Body".to_string(),
                short_description: "Teaser".to_string(),
                category: "Tech".to_string(),
                image_url: Some("https://example.com/a.png".to_string()),
                post_date: None,
            },
            Some(author),
        )
        .unwrap();

        let article = Article::from(&post);

        assert_eq!(article.source, ARTICLE_SOURCE);
        assert_eq!(article.author, author.to_string());
        assert_eq!(article.content, article.description);
        assert_eq!(article.url_to_image, "https://example.com/a.png");
        assert_eq!(article.id, post.id.to_string());
        // publishedAt is valid ISO-8601
        assert!(article.published_at.parse::<DateTime<Utc>>().is_ok());
    }

    #[test]
    fn article_author_defaults_to_unknown() {
        let post = Post::create(
            PostDraft {
                title: "Title".to_string(),
                description: "Body".to_string(),
                short_description: "Teaser".to_string(),
                category: "Tech".to_string(),
                image_url: None,
                post_date: None,
            },
            None,
        )
        .unwrap();

        let article = Article::from(&post);
        assert_eq!(article.author, "Unknown");
        assert_eq!(article.url_to_image, "");
    }

    #[test]
    fn article_serializes_camel_case() {
        let post = Post::create(
            PostDraft {
                title: "Title".to_string(),
                description: "Body".to_string(),
                short_description: "Teaser".to_string(),
                category: "Tech".to_string(),
                image_url: None,
                post_date: None,
            },
            None,
        )
        .unwrap();

        let value = serde_json::to_value(Article::from(&post)).unwrap();
        assert!(value.get("shortDescription").is_some());
        assert!(value.get("urlToImage").is_some());
        assert!(value.get("publishedAt").is_some());
    }

    #[test]
    fn auth_response_serializes_camel_case() {
        let value = serde_json::to_value(AuthResponse {
            id: "id".to_string(),
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            access_token: "token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
        .unwrap();

        assert!(value.get("accessToken").is_some());
        assert!(value.get("tokenType").is_some());
        assert!(value.get("expiresIn").is_some());
        assert!(value.get("access_token").is_none());
    }

    #[test]
    fn post_date_parsing_accepts_rfc3339_and_plain_dates() {
        assert!(parse_post_date("2024-03-01T10:00:00Z").is_some());
        assert!(parse_post_date("2024-03-01T10:00:00+02:00").is_some());
        assert_eq!(
            parse_post_date("2024-03-01").unwrap().to_rfc3339(),
            "2024-03-01T00:00:00+00:00"
        );
        assert!(parse_post_date("next tuesday").is_none());
    }
}
