//! Entity tags for versioned resources
//!
//! The tag is the row version in double quotes. `If-None-Match` makes a GET
//! conditional; `If-Match` turns into a [`VersionCheck`] for updates.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use hb_core::domain::value_objects::VersionCheck;

use super::error::ApiError;

pub fn entity_tag(version: i64) -> String {
    format!("\"{}\"", version)
}

/// Version inside a strong tag, `None` when malformed
fn parse_tag(tag: &str) -> Option<i64> {
    tag.trim()
        .strip_prefix('"')?
        .strip_suffix('"')?
        .parse()
        .ok()
}

/// True when the client's `If-None-Match` already names `version`.
/// Weak tags compare equal to their strong form.
pub fn is_not_modified(req: &HttpRequest, version: i64) -> bool {
    let Some(value) = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    value.split(',').any(|tag| {
        let tag = tag.trim();
        tag == "*" || parse_tag(tag.trim_start_matches("W/")) == Some(version)
    })
}

/// `If-Match` as a precondition; absent means last-writer-wins
pub fn precondition(req: &HttpRequest) -> Result<Option<VersionCheck>, ApiError> {
    let Some(value) = req.headers().get(header::IF_MATCH) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| invalid_if_match())?
        .trim();
    if value == "*" {
        return Ok(Some(VersionCheck::Any));
    }
    let versions = value
        .split(',')
        .map(|tag| parse_tag(tag).ok_or_else(invalid_if_match))
        .collect::<Result<Vec<_>, _>>()?;
    if let [version] = versions[..] {
        return Ok(Some(VersionCheck::Exact(version)));
    }
    Ok(Some(VersionCheck::OneOf(versions)))
}

fn invalid_if_match() -> ApiError {
    ApiError::bad_request(
        "invalid_if_match",
        "If-Match must be * or a list of quoted versions such as \"3\"",
    )
}

pub fn not_modified(version: i64) -> HttpResponse {
    HttpResponse::NotModified()
        .insert_header((header::ETAG, entity_tag(version)))
        .finish()
}
