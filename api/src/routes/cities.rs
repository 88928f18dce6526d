//! `/api/v1/cities`: public reads, admin or manager writes

use actix_web::{web, HttpRequest, HttpResponse};
use hb_shared::PaginatedResponse;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::city::{CityRequest, CityResponse};
use crate::dto::hotel::HotelResponse;
use crate::dto::PageQuery;
use crate::handlers::response::{created, ok};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_cities))
            .route(web::post().to(create_city).wrap(JwtAuth::new())),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_city))
            .route(web::put().to(update_city).wrap(JwtAuth::new()))
            .route(web::delete().to(delete_city).wrap(JwtAuth::new())),
    )
    .route("/{id}/hotels", web::get().to(list_city_hotels));
}

pub async fn list_cities(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let cities = state.cities.list().await?;
    let cities: Vec<CityResponse> = cities.into_iter().map(CityResponse::from).collect();
    Ok(ok(&req, cities))
}

pub async fn get_city(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let city = state.cities.get(path.into_inner()).await?;
    Ok(ok(&req, CityResponse::from(city)))
}

pub async fn create_city(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CityRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let city = state
        .cities
        .create(&auth.actor(), body.into_inner().into())
        .await?;
    Ok(created(&req, CityResponse::from(city)))
}

/// Full replacement of name and country
pub async fn update_city(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<CityRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let city = state
        .cities
        .update(&auth.actor(), path.into_inner(), body.into_inner().into())
        .await?;
    Ok(ok(&req, CityResponse::from(city)))
}

/// 409 while hotels still reference the city
pub async fn delete_city(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.cities.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_city_hotels(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();
    let (hotels, total) = state
        .hotels
        .list_by_city(path.into_inner(), &pagination)
        .await?;

    let hotels = hotels.into_iter().map(HotelResponse::from).collect();
    Ok(ok(&req, PaginatedResponse::new(hotels, pagination, total)))
}
