//! CORS middleware configuration for cross-origin requests.
//!
//! Development accepts any origin. Everywhere else only the origins listed
//! in `ServerConfig::allowed_origins` may call the API.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use hb_shared::{Environment, ServerConfig};

const PREFLIGHT_MAX_AGE: usize = 3600;

pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_restricted_cors(&server.allowed_origins)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn exposed_headers() -> Vec<header::HeaderName> {
    vec![
        header::ETAG,
        header::RETRY_AFTER,
        header::HeaderName::from_static("x-request-id"),
    ]
}

fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allow_any_header()
        .expose_headers(exposed_headers())
        .max_age(PREFLIGHT_MAX_AGE)
}

fn create_restricted_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::IF_MATCH,
            header::IF_NONE_MATCH,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(exposed_headers())
        .max_age(PREFLIGHT_MAX_AGE);

    for origin in origins.iter().map(|o| o.trim()).filter(|o| !o.is_empty()) {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }
    if origins.is_empty() {
        log::warn!("No allowed origins configured; cross-origin requests will be refused");
    }

    cors
}
