use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::{bail, Context};
use hb_api::app::{create_app, AppState, Repositories};
use hb_api::routes::health::HealthProbe;
use hb_core::services::verification::InMemoryOtpStore;
use hb_core::services::{MemoryCache, MemorySweeper, OtpStore, ServiceCache};
use hb_infra::cache::{RedisCache, RedisClient, RedisOtpStore};
use hb_infra::database::DatabasePool;
use hb_infra::otp::build_sender_factory;
use hb_shared::{AppConfig, CacheBackend, StorageBackend};
use log::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting StayHub API Server ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        if config.is_production() {
            bail!("HOTEL__AUTH__JWT__SECRET must be set in production");
        }
        warn!("Using the built-in JWT secret; do not use this outside development");
    }

    let mut probes: Vec<Arc<dyn HealthProbe>> = Vec::new();

    let repos = match config.server.storage {
        StorageBackend::Mysql => {
            let database = DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to MySQL")?;
            if config.database.run_migrations {
                database
                    .run_migrations()
                    .await
                    .context("Failed to run database migrations")?;
            }
            let repos = Repositories::mysql(&database);
            probes.push(Arc::new(database));
            repos
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on restart");
            Repositories::in_memory()
        }
    };

    let mut sweeper = MemorySweeper::new(config.cache.sweep_interval);
    let (cache, otp_store): (ServiceCache, Arc<dyn OtpStore>) = match config.cache.backend {
        CacheBackend::Redis => {
            let redis = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            probes.push(Arc::new(redis.clone()));
            (
                ServiceCache::new(
                    Arc::new(RedisCache::new(redis.clone())),
                    config.cache.default_ttl,
                ),
                Arc::new(RedisOtpStore::new(redis)),
            )
        }
        CacheBackend::Memory => {
            let memory = MemoryCache::new();
            let store = InMemoryOtpStore::new();
            sweeper = sweeper.with_cache(memory.clone()).with_otp_store(store.clone());
            (
                ServiceCache::new(Arc::new(memory), config.cache.default_ttl),
                Arc::new(store),
            )
        }
    };

    let senders =
        build_sender_factory(&config.otp).context("Failed to configure passcode delivery")?;

    let state = probes.into_iter().fold(
        AppState::build(repos, cache, otp_store, senders, &config),
        AppState::with_probe,
    );
    state.token_cleanup(&config).start_background_task();
    Arc::new(sweeper).start_background_task();
    let state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    HttpServer::new(move || create_app(state.clone(), &app_config))
        .workers(config.server.worker_count())
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
