//! `/api/v1/reviews`

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::review::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::handlers::response::{created, ok};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_review).wrap(JwtAuth::new()))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_review))
                .route(web::patch().to(update_review).wrap(JwtAuth::new()))
                .route(web::delete().to(delete_review).wrap(JwtAuth::new())),
        );
}

/// One review per guest and hotel; 409 on a second one
pub async fn create_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = state
        .reviews
        .create(&auth.actor(), body.into_inner().into())
        .await?;
    Ok(created(&req, ReviewResponse::from(review)))
}

pub async fn get_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let review = state.reviews.get(path.into_inner()).await?;
    Ok(ok(&req, ReviewResponse::from(review)))
}

/// Author only
pub async fn update_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = state
        .reviews
        .update(&auth.actor(), path.into_inner(), body.into_inner().into())
        .await?;
    Ok(ok(&req, ReviewResponse::from(review)))
}

pub async fn delete_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.reviews.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
