//! Success envelopes

use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use hb_shared::ApiResponse;
use serde::Serialize;

use super::etag::entity_tag;
use crate::dto::MessageResponse;
use crate::middleware::request_id::RequestId;

fn envelope<T: Serialize>(req: &HttpRequest, data: T) -> ApiResponse<T> {
    let response = ApiResponse::success(data);
    match req.extensions().get::<RequestId>() {
        Some(id) => response.with_request_id(id.as_str()),
        None => response,
    }
}

pub fn ok<T: Serialize>(req: &HttpRequest, data: T) -> HttpResponse {
    HttpResponse::Ok().json(envelope(req, data))
}

pub fn created<T: Serialize>(req: &HttpRequest, data: T) -> HttpResponse {
    HttpResponse::Created().json(envelope(req, data))
}

/// 200 carrying the entity's version as `ETag`
pub fn ok_tagged<T: Serialize>(req: &HttpRequest, data: T, version: i64) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ETAG, entity_tag(version)))
        .json(envelope(req, data))
}

pub fn message(req: &HttpRequest, text: &str) -> HttpResponse {
    ok(
        req,
        MessageResponse {
            message: text.to_string(),
        },
    )
}
