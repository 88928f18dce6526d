use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse};
use crate::dto::user::UserResponse;
use crate::handlers::etag::{is_not_modified, not_modified};
use crate::handlers::response::{message, ok, ok_tagged};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/login
///
/// ## Errors
/// - 401: Wrong email or password
/// - 403: Email not verified yet
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let session = state.auth.login(&body.email, &body.password).await?;
    Ok(ok(&req, LoginResponse::from(session)))
}

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token; the old one stops working.
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let tokens = state.auth.refresh(&body.refresh_token).await?;
    Ok(ok(&req, TokenResponse::from(tokens)))
}

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented access token and every refresh token of the user.
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    state.auth.logout(&auth.claims).await?;
    Ok(message(&req, "Logged out successfully"))
}

/// Handler for GET /api/v1/auth/me
pub async fn me(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let user = state.auth.current_user(auth.user_id).await?;
    if is_not_modified(&req, user.version) {
        return Ok(not_modified(user.version));
    }

    let version = user.version;
    Ok(ok_tagged(&req, UserResponse::from(user), version))
}
