//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use quill_shared::response::MessageResponse;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn auth_response(user: &User, token_service: &dyn TokenService) -> AppResult<AuthResponse> {
    let access_token = token_service.issue(user.id)?;

    Ok(AuthResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    // Check if user already exists (email is an exact-match unique key)
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service.hash(&req.password)?;

    // Create user
    let user = state
        .users
        .insert(User::new(req.name, req.email, password_hash))
        .await?;

    // Issue the identity artifact alongside the public projection
    Ok(HttpResponse::Created().json(auth_response(&user, &***token_service)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Unknown email and wrong password produce the same response.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(auth_response(&user, &***token_service)?))
}

/// POST /api/auth/logout
///
/// Stateless tokens leave nothing to destroy server-side; the client
/// discards its artifact. Idempotent, succeeds with or without one.
pub async fn logout(_identity: OptionalIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out")))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
    }))
}
