//! `/api/v1/users`: profiles, self or admin. Mounted behind `JwtAuth`.

use actix_web::{web, HttpRequest, HttpResponse};
use hb_shared::PaginatedResponse;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::user::{UpdateUserRequest, UserResponse};
use crate::dto::PageQuery;
use crate::handlers::etag::{is_not_modified, not_modified, precondition};
use crate::handlers::response::{ok, ok_tagged};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_users)).service(
        web::resource("/{id}")
            .route(web::get().to(get_user))
            .route(web::patch().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}

/// Admin only
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();
    let (users, total) = state.users.list(&auth.actor(), &pagination).await?;

    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(ok(&req, PaginatedResponse::new(users, pagination, total)))
}

pub async fn get_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = state.users.get(&auth.actor(), path.into_inner()).await?;
    if is_not_modified(&req, user.version) {
        return Ok(not_modified(user.version));
    }

    let version = user.version;
    Ok(ok_tagged(&req, UserResponse::from(user), version))
}

/// Changing `role` needs an admin
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let expected = precondition(&req)?;

    let user = state
        .users
        .update(&auth.actor(), path.into_inner(), body.into_inner().into(), expected)
        .await?;

    let version = user.version;
    Ok(ok_tagged(&req, UserResponse::from(user), version))
}

pub async fn delete_user(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.users.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
