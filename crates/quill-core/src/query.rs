//! Post listing filter and pagination window.

use crate::domain::Post;

/// Default page size for post listings.
pub const DEFAULT_LIMIT: u64 = 10;

/// Filter + pagination window for the post listing endpoint.
///
/// `category` is an exact match; `q` is a case-insensitive substring match
/// across title, short description, and description, ANDed with the
/// category constraint. Results are ordered by `post_date` descending with
/// ties broken by insertion order.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    page: u64,
    limit: u64,
}

impl PostQuery {
    pub fn new(
        category: Option<String>,
        q: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            q: q.filter(|q| !q.is_empty()),
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    /// 1-based page number, always >= 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size, always >= 1.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of matching documents to skip: (page - 1) * limit.
    /// Saturates on hostile page/limit values instead of overflowing.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Whether a post satisfies the filter, ignoring pagination.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = &self.category {
            if post.category != *category {
                return false;
            }
        }
        if let Some(q) = &self.q {
            let needle = q.to_lowercase();
            let hit = [&post.title, &post.short_description, &post.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn post(title: &str, category: &str) -> Post {
        Post::create(
            PostDraft {
                title: title.to_string(),
                description: format!("{title} body"),
                short_description: format!("{title} teaser"),
                category: category.to_string(),
                image_url: None,
                post_date: None,
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn defaults_and_clamping() {
        let query = PostQuery::new(None, None, None, None);
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);

        let query = PostQuery::new(None, None, Some(0), Some(0));
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn offset_is_page_window() {
        let query = PostQuery::new(None, None, Some(2), Some(10));
        assert_eq!(query.offset(), 10);

        let query = PostQuery::new(None, None, Some(3), Some(25));
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn offset_saturates_on_huge_pages() {
        let query = PostQuery::new(None, None, Some(u64::MAX), Some(2));
        assert_eq!(query.offset(), u64::MAX);

        let query = PostQuery::new(None, None, Some(2), Some(u64::MAX));
        assert_eq!(query.offset(), u64::MAX);
    }

    #[test]
    fn category_is_exact_match() {
        let query = PostQuery::new(Some("Tech".to_string()), None, None, None);
        assert!(query.matches(&post("Intro", "Tech")));
        assert!(!query.matches(&post("Intro", "tech")));
        assert!(!query.matches(&post("Intro", "News")));
    }

    #[test]
    fn free_text_is_case_insensitive_across_fields() {
        let query = PostQuery::new(None, Some("GEOFENCING".to_string()), None, None);
        assert!(query.matches(&post("Geofencing in practice", "Tech")));
        assert!(!query.matches(&post("Unrelated", "Tech")));
    }

    #[test]
    fn category_and_text_combine_with_and() {
        let query = PostQuery::new(
            Some("Tech".to_string()),
            Some("geofencing".to_string()),
            None,
            None,
        );
        assert!(query.matches(&post("Geofencing in practice", "Tech")));
        assert!(!query.matches(&post("Geofencing in practice", "News")));
    }

    #[test]
    fn empty_parameters_are_ignored() {
        let query = PostQuery::new(Some(String::new()), Some(String::new()), None, None);
        assert!(query.category.is_none());
        assert!(query.q.is_none());
    }
}
