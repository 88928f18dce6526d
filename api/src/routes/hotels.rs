//! `/api/v1/hotels`: catalogue reads are public; writes need a catalogue manager

use actix_web::{web, HttpRequest, HttpResponse};
use hb_shared::PaginatedResponse;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::hotel::{CreateHotelRequest, HotelListQuery, HotelResponse, UpdateHotelRequest};
use crate::dto::review::HotelReviewsResponse;
use crate::dto::room::RoomResponse;
use crate::dto::PageQuery;
use crate::handlers::etag::{is_not_modified, not_modified, precondition};
use crate::handlers::response::{created, ok, ok_tagged};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_hotels))
            .route(web::post().to(create_hotel).wrap(JwtAuth::new())),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_hotel))
            .route(web::patch().to(update_hotel).wrap(JwtAuth::new()))
            .route(web::delete().to(delete_hotel).wrap(JwtAuth::new())),
    )
    .route("/{id}/rooms", web::get().to(list_hotel_rooms))
    .route("/{id}/reviews", web::get().to(list_hotel_reviews));
}

/// Optionally filtered by `city_id`
pub async fn list_hotels(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<HotelListQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();
    let (hotels, total) = state.hotels.list(query.city_id, &pagination).await?;

    let hotels = hotels.into_iter().map(HotelResponse::from).collect();
    Ok(ok(&req, PaginatedResponse::new(hotels, pagination, total)))
}

pub async fn get_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let hotel = state.hotels.get(path.into_inner()).await?;
    if is_not_modified(&req, hotel.version) {
        return Ok(not_modified(hotel.version));
    }

    let version = hotel.version;
    Ok(ok_tagged(&req, HotelResponse::from(hotel), version))
}

pub async fn create_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateHotelRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let hotel = state
        .hotels
        .create(&auth.actor(), body.into_inner().into())
        .await?;
    log::info!("Hotel {} created by {}", hotel.id, auth.user_id);
    Ok(created(&req, HotelResponse::from(hotel)))
}

pub async fn update_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateHotelRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let expected = precondition(&req)?;

    let hotel = state
        .hotels
        .update(&auth.actor(), path.into_inner(), body.into_inner().into(), expected)
        .await?;

    let version = hotel.version;
    Ok(ok_tagged(&req, HotelResponse::from(hotel), version))
}

pub async fn delete_hotel(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.hotels.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_hotel_rooms(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rooms = state.rooms.list_by_hotel(path.into_inner()).await?;
    let rooms: Vec<RoomResponse> = rooms.into_iter().map(RoomResponse::from).collect();
    Ok(ok(&req, rooms))
}

pub async fn list_hotel_reviews(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();
    let page = state
        .reviews
        .list_by_hotel(path.into_inner(), &pagination)
        .await?;
    Ok(ok(&req, HotelReviewsResponse::new(page, pagination)))
}
