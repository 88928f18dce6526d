//! `/api/v1/rooms`

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::room::{AvailabilityQuery, CreateRoomRequest, RoomResponse, UpdateRoomRequest};
use crate::handlers::etag::{is_not_modified, not_modified, precondition};
use crate::handlers::response::{created, ok, ok_tagged};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room).wrap(JwtAuth::new()))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_room))
                .route(web::patch().to(update_room).wrap(JwtAuth::new()))
                .route(web::delete().to(delete_room).wrap(JwtAuth::new())),
        )
        .route("/{id}/availability", web::get().to(room_availability));
}

pub async fn create_room(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let room = state
        .rooms
        .create(&auth.actor(), body.into_inner().into())
        .await?;
    Ok(created(&req, RoomResponse::from(room)))
}

pub async fn get_room(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let room = state.rooms.get(path.into_inner()).await?;
    if is_not_modified(&req, room.version) {
        return Ok(not_modified(room.version));
    }

    let version = room.version;
    Ok(ok_tagged(&req, RoomResponse::from(room), version))
}

/// Rate changes apply to new bookings only
pub async fn update_room(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRoomRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let expected = precondition(&req)?;

    let room = state
        .rooms
        .update(&auth.actor(), path.into_inner(), body.into_inner().into(), expected)
        .await?;

    let version = room.version;
    Ok(ok_tagged(&req, RoomResponse::from(room), version))
}

pub async fn delete_room(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.rooms.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `[check_in, check_out)` availability and the price it would cost
pub async fn room_availability(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, ApiError> {
    let availability = state
        .rooms
        .availability(path.into_inner(), query.check_in, query.check_out)
        .await?;
    Ok(ok(&req, availability))
}
