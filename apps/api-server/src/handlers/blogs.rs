//! Blog post handlers: listing/query plus CRUD.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_core::query::PostQuery;
use quill_shared::dto::{
    Article, CreatePostRequest, ListPostsParams, UpdatePostRequest, parse_post_date,
};
use quill_shared::response::{ArticleListResponse, ArticleResponse, MessageResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Malformed path ids are a validation failure, not an internal one.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    raw.parse()
        .map_err(|_| AppError::Validation("Invalid post id".to_string()))
}

/// Normalize an optional client-supplied post date.
fn normalize_post_date(raw: Option<&str>) -> AppResult<Option<chrono::DateTime<chrono::Utc>>> {
    match raw {
        None => Ok(None),
        Some(value) => parse_post_date(value)
            .map(Some)
            .ok_or_else(|| AppError::Validation("Invalid postDate".to_string())),
    }
}

/// GET /api/blogs
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = PostQuery::new(params.category, params.q, params.page, params.limit);

    let (posts, total) = state.posts.list(&query).await?;
    let articles = posts.iter().map(Article::from).collect();

    Ok(HttpResponse::Ok().json(ArticleListResponse::new(total, articles)))
}

/// POST /api/blogs - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let draft = PostDraft {
        title: req.title,
        description: req.description,
        short_description: req.short_description,
        category: req.category,
        image_url: req.image_url,
        post_date: normalize_post_date(req.post_date.as_deref())?,
    };

    let post = Post::create(draft, Some(identity.user_id))?;
    let stored = state.posts.insert(post).await?;

    Ok(HttpResponse::Created().json(ArticleResponse::new(Article::from(&stored))))
}

/// GET /api/blogs/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ArticleResponse::new(Article::from(&post))))
}

/// PUT /api/blogs/{id} - Protected route
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.apply(PostPatch {
        title: req.title,
        description: req.description,
        short_description: req.short_description,
        category: req.category,
        image_url: req.image_url,
        post_date: normalize_post_date(req.post_date.as_deref())?,
    });

    let stored = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(ArticleResponse::new(Article::from(&stored))))
}

/// DELETE /api/blogs/{id} - Protected route
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    state.posts.delete(id).await.map_err(|e| match e {
        quill_core::error::RepoError::NotFound => AppError::NotFound("Post not found".to_string()),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use quill_core::ports::TokenService;
    use quill_infra::{JwtConfig, JwtTokenService};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        }))
    }

    fn bearer(token_service: &Arc<dyn TokenService>) -> (&'static str, String) {
        let token = token_service.issue(uuid::Uuid::new_v4()).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! test_app {
        ($token_service:expr) => {{
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .app_data(web::Data::new($token_service.clone()))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    fn post_payload(title: &str, category: &str) -> Value {
        json!({
            "title": title,
            "description": format!("{title} body"),
            "shortDescription": format!("{title} teaser"),
            "category": category,
        })
    }

    #[actix_web::test]
    async fn create_requires_authentication() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(post_payload("Untitled", "Tech"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_rejects_missing_category() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&tokens))
            .set_json(json!({
                "title": "Untitled",
                "description": "Body",
                "shortDescription": "Teaser",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn create_returns_the_shaped_article() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&tokens))
            .set_json(post_payload("Geofencing in practice", "Tech"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        let article = &body["article"];
        assert!(article["id"].is_string());
        assert_eq!(article["source"], "quill");
        assert_eq!(article["content"], article["description"]);
        assert_eq!(article["urlToImage"], "");
        // publishedAt is a valid ISO-8601 timestamp
        let published_at = article["publishedAt"].as_str().unwrap();
        assert!(published_at.parse::<chrono::DateTime<chrono::Utc>>().is_ok());
    }

    #[actix_web::test]
    async fn list_filters_case_insensitively() {
        let tokens = token_service();
        let app = test_app!(tokens);

        for payload in [
            post_payload("Geofencing in practice", "Tech"),
            post_payload("Unrelated", "Tech"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/blogs")
                .insert_header(bearer(&tokens))
                .set_json(payload)
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::CREATED
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/blogs?q=geofencing&category=Tech")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["totalResults"], 1);
        assert_eq!(body["articles"][0]["title"], "Geofencing in practice");
    }

    #[actix_web::test]
    async fn list_total_ignores_pagination() {
        let tokens = token_service();
        let app = test_app!(tokens);

        for i in 0..12 {
            let req = test::TestRequest::post()
                .uri("/api/blogs")
                .insert_header(bearer(&tokens))
                .set_json(post_payload(&format!("post-{i}"), "Tech"))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/blogs?page=2&limit=10")
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

        assert_eq!(body["totalResults"], 12);
        assert_eq!(body["articles"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn read_update_delete_round_trip() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&tokens))
            .set_json(post_payload("Original", "Tech"))
            .to_request();
        let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = created["article"]["id"].as_str().unwrap().to_string();

        // Read is open
        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // Partial update only overwrites supplied fields
        let req = test::TestRequest::put()
            .uri(&format!("/api/blogs/{id}"))
            .insert_header(bearer(&tokens))
            .set_json(json!({"category": "News", "postDate": "2024-03-01"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["article"]["title"], "Original");
        assert_eq!(body["article"]["category"], "News");
        assert_eq!(body["article"]["publishedAt"], "2024-03-01T00:00:00+00:00");

        // Delete, then the id is gone
        let req = test::TestRequest::delete()
            .uri(&format!("/api/blogs/{id}"))
            .insert_header(bearer(&tokens))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/blogs/{id}"))
            .insert_header(bearer(&tokens))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_id_is_a_validation_error() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::get()
            .uri("/api/blogs/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unmatched_routes_are_method_not_allowed() {
        let tokens = token_service();
        let app = test_app!(tokens);

        let req = test::TestRequest::patch().uri("/api/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
