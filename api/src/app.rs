//! Application state and factory
//!
//! Builds the service graph from a set of repositories and provides the
//! factory for the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpRequest,
};
use hb_core::repositories::{
    BookingRepository, CityRepository, HotelRepository, MockBookingRepository, MockCityRepository,
    MockHotelRepository, MockReviewRepository, MockRoomRepository, MockTokenRepository,
    MockUserRepository, ReviewRepository, RoomRepository, TokenRepository, UserRepository,
};
use hb_core::services::token::{TokenCleanupConfig, TokenCleanupService, TokenServiceConfig};
use hb_core::services::verification::VerificationConfig;
use hb_core::services::{
    AuthService, AuthServiceConfig, BookingService, CityService, HotelService, OtpSenderFactory,
    OtpStore, ReviewService, RoomService, ServiceCache, TokenService, UserService,
    VerificationService,
};
use hb_infra::database::{
    DatabasePool, MySqlBookingRepository, MySqlCityRepository, MySqlHotelRepository,
    MySqlReviewRepository, MySqlRoomRepository, MySqlTokenRepository, MySqlUserRepository,
};
use hb_shared::AppConfig;

use crate::handlers::ApiError;
use crate::middleware::{create_cors, RequestIdMiddleware, SecurityMiddleware};
use crate::routes::{self, health::HealthProbe};

/// Storage behind the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub cities: Arc<dyn CityRepository>,
    pub hotels: Arc<dyn HotelRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// Process-local storage, lost on restart
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            tokens: Arc::new(MockTokenRepository::new()),
            cities: Arc::new(MockCityRepository::new()),
            hotels: Arc::new(MockHotelRepository::new()),
            rooms: Arc::new(MockRoomRepository::new()),
            bookings: Arc::new(MockBookingRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
        }
    }

    pub fn mysql(database: &DatabasePool) -> Self {
        let pool = database.get_pool();
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            tokens: Arc::new(MySqlTokenRepository::new(pool.clone())),
            cities: Arc::new(MySqlCityRepository::new(pool.clone())),
            hotels: Arc::new(MySqlHotelRepository::new(pool.clone())),
            rooms: Arc::new(MySqlRoomRepository::new(pool.clone())),
            bookings: Arc::new(MySqlBookingRepository::new(pool.clone())),
            reviews: Arc::new(MySqlReviewRepository::new(pool.clone())),
        }
    }
}

/// Services shared by every worker
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub users: UserService,
    pub cities: CityService,
    pub hotels: HotelService,
    pub rooms: RoomService,
    pub bookings: BookingService,
    pub reviews: ReviewService,
    pub probes: Vec<Arc<dyn HealthProbe>>,
}

impl AppState {
    pub fn build(
        repos: Repositories,
        cache: ServiceCache,
        otp_store: Arc<dyn OtpStore>,
        senders: OtpSenderFactory,
        config: &AppConfig,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(
            repos.tokens.clone(),
            TokenServiceConfig::from(&config.auth.jwt),
        ));
        let verification = Arc::new(VerificationService::new(
            otp_store,
            senders,
            VerificationConfig::from(&config.otp),
        ));

        Self {
            auth: Arc::new(AuthService::new(
                repos.users.clone(),
                tokens.clone(),
                verification,
                cache.clone(),
                AuthServiceConfig::from_app(&config.auth, &config.otp),
            )),
            users: UserService::new(
                repos.users.clone(),
                repos.bookings.clone(),
                repos.reviews.clone(),
                tokens.clone(),
                cache.clone(),
            ),
            cities: CityService::new(repos.cities.clone(), repos.hotels.clone(), cache.clone()),
            hotels: HotelService::new(
                repos.hotels.clone(),
                repos.cities.clone(),
                repos.rooms.clone(),
                repos.reviews.clone(),
                cache.clone(),
            ),
            rooms: RoomService::new(
                repos.rooms.clone(),
                repos.hotels.clone(),
                repos.bookings.clone(),
                cache.clone(),
            ),
            bookings: BookingService::new(repos.bookings.clone(), repos.rooms.clone(), cache.clone()),
            reviews: ReviewService::new(repos.reviews.clone(), repos.hotels.clone(), cache),
            tokens,
            probes: Vec::new(),
        }
    }

    /// Add a dependency reported by `/health`
    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Periodic purge of expired refresh tokens and revocation rows
    pub fn token_cleanup(&self, config: &AppConfig) -> Arc<TokenCleanupService> {
        Arc::new(TokenCleanupService::new(
            self.tokens.clone(),
            TokenCleanupConfig {
                interval_seconds: config.auth.token_cleanup_interval,
                enabled: config.auth.token_cleanup_interval > 0,
            },
        ))
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let auth = web::Data::from(state.auth.clone());

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, _req: &HttpRequest| {
            ApiError::bad_request("invalid_json", err.to_string()).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::bad_request("invalid_query", err.to_string()).into()
    });
    let path_config = web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::bad_request("invalid_path", err.to_string()).into()
    });

    App::new()
        .app_data(state)
        .app_data(auth)
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        // Last wrap runs first: request id, security, CORS, then logging
        .wrap(Logger::new(r#"%a "%r" %s %b %Dms rid=%{x-request-id}o"#))
        .wrap(create_cors(&config.server, config.environment))
        .wrap(SecurityMiddleware::for_environment(config.environment))
        .wrap(RequestIdMiddleware)
        .configure(routes::health::configure)
        .service(web::scope("/api/v1").configure(routes::configure))
        .default_service(web::route().to(routes::not_found))
}
