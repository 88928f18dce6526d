use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, RegisterResponse, SendCodeRequest, VerifyEmailRequest};
use crate::dto::user::UserResponse;
use crate::handlers::response::{created, message, ok};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/register
///
/// Creates an unverified guest account and sends a verification code over
/// the requested channel (email unless `channel` says otherwise).
///
/// ## Errors
/// - 400: Invalid body or phone number
/// - 409: Email already registered
/// - 503: Channel not configured or delivery failed
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let registration = state.auth.register(body.into_inner().into()).await?;
    log::info!("Registered user {}", registration.user.id);

    Ok(created(&req, RegisterResponse::from(registration)))
}

/// Handler for POST /api/v1/auth/verify-email
pub async fn verify_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let user = state.auth.verify_email(&body.email, &body.code).await?;
    Ok(ok(&req, UserResponse::from(user)))
}

/// Handler for POST /api/v1/auth/resend-code
///
/// Always answers 200 for unknown or verified addresses.
pub async fn resend_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    state
        .auth
        .resend_verification(&body.email, body.channel)
        .await?;
    Ok(message(
        &req,
        "If the account exists and is unverified, a new code has been sent",
    ))
}
