//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;

use actix_web::{HttpResponse, web};
use quill_shared::ErrorBody;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Blog routes: reads open, writes protected
            .service(
                web::resource("/blogs")
                    .route(web::get().to(blogs::list))
                    .route(web::post().to(blogs::create)),
            )
            .service(
                web::resource("/blogs/{id}")
                    .route(web::get().to(blogs::get_by_id))
                    .route(web::put().to(blogs::update))
                    .route(web::delete().to(blogs::delete)),
            ),
    )
    .default_service(web::route().to(method_not_allowed));
}

/// Unmatched method/path combinations.
async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody::new("Method not allowed"))
}
