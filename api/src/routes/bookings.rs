//! `/api/v1/bookings`: a guest's own stays, every stay for admins.
//! Mounted behind `JwtAuth`.

use actix_web::{web, HttpRequest, HttpResponse};
use hb_shared::PaginatedResponse;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::booking::{BookingResponse, CreateBookingRequest, UpdateBookingRequest};
use crate::dto::PageQuery;
use crate::handlers::etag::{is_not_modified, not_modified, precondition};
use crate::handlers::response::{created, ok, ok_tagged};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_bookings))
            .route(web::post().to(create_booking)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_booking))
            .route(web::patch().to(update_booking))
            .route(web::delete().to(delete_booking)),
    )
    .route("/{id}/cancel", web::post().to(cancel_booking));
}

pub async fn list_bookings(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();
    let (bookings, total) = state.bookings.list(&auth.actor(), &pagination).await?;

    let bookings = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(ok(&req, PaginatedResponse::new(bookings, pagination, total)))
}

/// 409 when the room is taken for any night of the stay
pub async fn create_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let booking = state
        .bookings
        .create(&auth.actor(), body.into_inner().into())
        .await?;
    log::info!("Booking {} created for room {}", booking.id, booking.room_id);
    Ok(created(&req, BookingResponse::from(booking)))
}

pub async fn get_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.bookings.get(&auth.actor(), path.into_inner()).await?;
    if is_not_modified(&req, booking.version) {
        return Ok(not_modified(booking.version));
    }

    let version = booking.version;
    Ok(ok_tagged(&req, BookingResponse::from(booking), version))
}

pub async fn update_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let expected = precondition(&req)?;

    let booking = state
        .bookings
        .update(&auth.actor(), path.into_inner(), body.into_inner().into(), expected)
        .await?;

    let version = booking.version;
    Ok(ok_tagged(&req, BookingResponse::from(booking), version))
}

pub async fn cancel_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.bookings.cancel(&auth.actor(), path.into_inner()).await?;

    let version = booking.version;
    Ok(ok_tagged(&req, BookingResponse::from(booking), version))
}

/// Admins any booking, owners only cancelled ones
pub async fn delete_booking(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.bookings.delete(&auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
