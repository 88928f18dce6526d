use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{ChangePasswordRequest, ResetPasswordRequest, SendCodeRequest};
use crate::handlers::response::message;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/forgot-password
///
/// Answers the same way whether or not the address is registered.
pub async fn forgot_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    state.auth.forgot_password(&body.email, body.channel).await?;
    Ok(message(
        &req,
        "If the account exists, a password reset code has been sent",
    ))
}

/// Handler for POST /api/v1/auth/reset-password
///
/// Signs the user out everywhere on success.
pub async fn reset_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    state
        .auth
        .reset_password(&body.email, &body.code, &body.new_password)
        .await?;
    Ok(message(&req, "Password has been reset"))
}

/// Handler for POST /api/v1/auth/change-password
pub async fn change_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    state
        .auth
        .change_password(auth.user_id, body.into_inner().into())
        .await?;
    Ok(message(&req, "Password changed"))
}
