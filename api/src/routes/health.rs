//! `GET /health`: reachability of the storage and cache backends

use std::collections::HashMap;
use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpResponse};
use async_trait::async_trait;
use hb_infra::cache::RedisClient;
use hb_infra::database::DatabasePool;
use hb_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// A backend dependency that can be pinged
#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected response to SELECT 1".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl HealthProbe for RedisClient {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected response to PING".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

/// 200 when every probe passes, 503 otherwise
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let mut services = HashMap::new();

    for probe in &state.probes {
        let started = Instant::now();
        let mut health = match probe.check().await {
            Ok(()) => ServiceHealth::healthy(),
            Err(message) => {
                log::warn!("Health probe {} failed: {}", probe.name(), message);
                ServiceHealth::unhealthy(message)
            }
        };
        health.response_time_ms = Some(started.elapsed().as_millis() as u64);
        services.insert(probe.name().to_string(), health);
    }

    let report = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    let status = match report.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    HttpResponse::build(status).json(report)
}
